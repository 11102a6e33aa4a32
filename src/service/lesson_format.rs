use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::domain::Domain;
use crate::models::record::{DayGroup, FormattedOutput, Lesson};
use crate::service::dates::{format_long_date, format_time};
use crate::service::grouping::group_by_day;
use crate::service::unwrap::{Unwrapped, unwrap_payload};

pub const UNKNOWN_SUBJECT: &str = "Nieznany przedmiot";
const UNKNOWN_TIME: &str = "Czas nieznany";

pub fn format_lessons(payload: &Value, tz: Tz, today: NaiveDate) -> FormattedOutput {
    let records = match unwrap_payload(payload, Domain::Lessons) {
        Unwrapped::Absent => return FormattedOutput::NoData(Domain::Lessons.no_data_message().into()),
        Unwrapped::Records(records) => records,
    };
    if records.is_empty() {
        return FormattedOutput::NotFound(Domain::Lessons.not_found_message().into());
    }

    let days = group_by_day::<Lesson>(records, tz, today)
        .into_iter()
        .map(render_day)
        .collect();
    FormattedOutput::Days(days)
}

fn render_day(mut group: DayGroup<Lesson>) -> String {
    // Stable: lessons sharing a start time keep their arrival order.
    group.records.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

    let mut out = format!("\n🗓️ **{}**\n\n", format_long_date(group.date));
    for lesson in &group.records {
        out.push_str(&render_lesson(lesson));
        out.push('\n');
    }
    out
}

pub fn render_lesson(lesson: &Lesson) -> String {
    let time = match (lesson.start.as_deref(), lesson.end.as_deref()) {
        (Some(start), Some(end)) => format!("{}-{}", format_time(start), format_time(end)),
        _ => UNKNOWN_TIME.to_string(),
    };
    let subject = lesson.subject.as_deref().unwrap_or(UNKNOWN_SUBJECT);
    let room = lesson
        .room
        .as_deref()
        .map(|room| format!(" _({room})_"))
        .unwrap_or_default();
    format!("🕐 {time} | **{subject}**{room}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use chrono_tz::Europe::Warsaw;
    use serde_json::json;

    fn lesson(raw: Value) -> Lesson {
        Lesson::from_raw(&raw, Warsaw)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(output: FormattedOutput) -> Vec<String> {
        match output {
            FormattedOutput::Days(days) => days,
            other => panic!("expected day blocks, got {other:?}"),
        }
    }

    #[test]
    fn single_lesson_renders_one_block() {
        let payload = json!([{"Subject": "Math", "Date": "2024-03-04", "TimeFrom": "08:00", "TimeTo": "08:45"}]);
        let blocks = days(format_lessons(&payload, Warsaw, day(2024, 1, 1)));
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("\n🗓️ **Monday, 4 March 2024**\n\n"));
        assert!(blocks[0].contains("🕐 8:00 AM-8:45 AM | **Math**"));
    }

    #[test]
    fn lessons_within_a_day_sort_by_start_time() {
        let payload = json!({"Envelope": [
            {"Subject": "Third", "Date": {"Date": "2024-03-04"}, "TimeSlot": {"Start": "10:00", "End": "10:45"}},
            {"Subject": "Untimed", "Date": "2024-03-04"},
            {"Subject": "First", "Date": "2024-03-04", "startTime": "08:00", "endTime": "08:45"},
            {"Subject": "Second", "Date": "2024-03-04", "TimeFrom": "09:00", "TimeTo": "09:45"}
        ]});
        let blocks = days(format_lessons(&payload, Warsaw, day(2024, 1, 1)));
        let block = &blocks[0];
        let order: Vec<usize> = ["Untimed", "First", "Second", "Third"]
            .iter()
            .map(|name| block.find(&format!("**{name}**")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{block}");
        assert!(block.contains("🕐 Czas nieznany | **Untimed**"));
    }

    #[test]
    fn subject_and_room_fall_back_through_aliases() {
        let parsed = lesson(json!({
            "Subject": {"Name": "Physics"},
            "Room": {"Code": "204", "Name": "Lab"},
            "TimeSlot": {"Start": "13:00", "End": "13:45"}
        }));
        assert_eq!(render_lesson(&parsed), "🕐 1:00 PM-1:45 PM | **Physics** _(204)_");

        let parsed = lesson(json!({"Title": "Choir", "ClassRoom": "Aula"}));
        assert_eq!(render_lesson(&parsed), "🕐 Czas nieznany | **Choir** _(Aula)_");

        let parsed = lesson(json!({"Subject": {"Id": 7}}));
        assert_eq!(render_lesson(&parsed), "🕐 Czas nieznany | **Nieznany przedmiot**");
    }

    #[test]
    fn diagnostics_for_missing_or_empty_payloads() {
        let today = day(2024, 1, 1);
        assert_eq!(
            format_lessons(&json!(null), Warsaw, today),
            FormattedOutput::NoData("❌ Nie otrzymano danych o lekcjach.".into())
        );
        assert_eq!(
            format_lessons(&json!({"Envelope": []}), Warsaw, today),
            FormattedOutput::NotFound("❌ Nie znaleziono lekcji dla podanego zakresu dat.".into())
        );
    }
}
