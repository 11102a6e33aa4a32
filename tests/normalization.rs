use chrono::NaiveDate;
use chrono_tz::Europe::Warsaw;
use eduDiscord::models::lucky_number::LuckyNumberOutcome;
use eduDiscord::models::record::FormattedOutput;
use eduDiscord::service::exam_format::format_exams;
use eduDiscord::service::homework_format::format_homework;
use eduDiscord::service::lesson_format::format_lessons;
use eduDiscord::service::lucky_number::extract_lucky_number;
use serde_json::json;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn lesson_date_shapes_render_identically() {
    let today = day(2024, 1, 1);
    let shapes = [
        json!([{"Subject": "Math", "Date": "2024-03-04", "TimeFrom": "08:00", "TimeTo": "08:45"}]),
        json!({"Lessons": [{"Subject": "Math", "Date": {"Date": "2024-03-04"}, "TimeFrom": "08:00", "TimeTo": "08:45"}]}),
        json!({"Result": [{"Subject": "Math", "Date": {"Timestamp": 1_709_546_400_000_i64}, "TimeSlot": {"Start": "08:00", "End": "08:45"}}]}),
    ];
    let outputs: Vec<_> = shapes.iter().map(|p| format_lessons(p, Warsaw, today)).collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        outputs[0],
        FormattedOutput::Days(vec![
            "\n🗓️ **Monday, 4 March 2024**\n\n🕐 8:00 AM-8:45 AM | **Math**\n".to_string()
        ])
    );
}

#[test]
fn undated_records_are_never_dropped() {
    let today = day(2024, 6, 3);
    let payload = json!({"Data": [
        {"Subject": "Chemistry", "Deadline": "2024-06-05", "Content": "Acids"},
        {"Subject": "Geography", "Deadline": {"Date": "whenever"}, "Content": "Maps"}
    ]});
    let FormattedOutput::Days(blocks) = format_exams(&payload, Warsaw, today) else {
        panic!("expected day blocks");
    };
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].contains("Monday, 3 June 2024") && blocks[0].contains("Geography"));
    assert!(blocks[1].contains("Wednesday, 5 June 2024") && blocks[1].contains("Chemistry"));
}

#[test]
fn unrecognizable_input_yields_diagnostics() {
    let today = day(2024, 1, 1);
    for payload in [json!([]), json!({}), json!({"Meta": {"Count": 0}}), json!(42)] {
        assert!(matches!(format_lessons(&payload, Warsaw, today), FormattedOutput::NotFound(_)));
        assert!(matches!(format_exams(&payload, Warsaw, today), FormattedOutput::NotFound(_)));
        assert!(matches!(format_homework(&payload, Warsaw, today), FormattedOutput::NotFound(_)));
    }
}

#[test]
fn lucky_number_shapes() {
    let today = day(2024, 1, 1);
    let LuckyNumberOutcome::Available(lucky) =
        extract_lucky_number(&json!({"Number": 17, "Date": "2024-03-04"}), Warsaw, today)
    else {
        panic!("expected a lucky number");
    };
    assert_eq!(lucky.value, Some(json!(17)));
    assert_eq!(lucky.date, day(2024, 3, 4));

    assert_eq!(
        extract_lucky_number(&json!(null), Warsaw, today),
        LuckyNumberOutcome::Unavailable
    );
}
