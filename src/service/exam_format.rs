use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::domain::Domain;
use crate::models::record::{DayGroup, Exam, FormattedOutput};
use crate::service::dates::format_long_date;
use crate::service::grouping::group_by_day;
use crate::service::lesson_format::UNKNOWN_SUBJECT;
use crate::service::unwrap::{Unwrapped, unwrap_payload};

/// Exams keep their arrival order within a day.
pub fn format_exams(payload: &Value, tz: Tz, today: NaiveDate) -> FormattedOutput {
    let records = match unwrap_payload(payload, Domain::Exams) {
        Unwrapped::Absent => return FormattedOutput::NoData(Domain::Exams.no_data_message().into()),
        Unwrapped::Records(records) => records,
    };
    if records.is_empty() {
        return FormattedOutput::NotFound(Domain::Exams.not_found_message().into());
    }

    FormattedOutput::Days(
        group_by_day::<Exam>(records, tz, today)
            .iter()
            .map(render_day)
            .collect(),
    )
}

fn render_day(group: &DayGroup<Exam>) -> String {
    let mut out = format!("\n🗓️ **{}**\n\n", format_long_date(group.date));
    for exam in &group.records {
        out.push_str(&render_exam(exam));
    }
    out
}

pub fn render_exam(exam: &Exam) -> String {
    format!(
        "✍️ **{}**\n   _{}_\n\n",
        exam.subject.as_deref().unwrap_or(UNKNOWN_SUBJECT),
        exam.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Warsaw;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wrapped_exam_renders_subject_and_body() {
        let payload = json!({"Exams": [{"Subject": {"Name": "Physics"}, "Deadline": "2024-03-10", "Content": "Chapters 1-3"}]});
        let FormattedOutput::Days(blocks) = format_exams(&payload, Warsaw, day(2024, 1, 1)) else {
            panic!("expected day blocks");
        };
        assert_eq!(
            blocks,
            vec!["\n🗓️ **Sunday, 10 March 2024**\n\n✍️ **Physics**\n   _Chapters 1-3_\n\n".to_string()]
        );
    }

    #[test]
    fn content_falls_back_through_aliases_and_order_is_kept() {
        let payload = json!([
            {"Subject": "History", "Date": {"Timestamp": 1_709_546_400_000_i64}, "Text": "Oral quiz"},
            {"Subject": "Biology", "Deadline": {"Date": "2024-03-04"}, "Description": "Cells"},
            {"Deadline": "2024-03-04"}
        ]);
        let FormattedOutput::Days(blocks) = format_exams(&payload, Warsaw, day(2024, 1, 1)) else {
            panic!("expected day blocks");
        };
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert!(block.find("History").unwrap() < block.find("Biology").unwrap());
        assert!(block.contains("_Oral quiz_"));
        assert!(block.contains("_Cells_"));
        assert!(block.contains("✍️ **Nieznany przedmiot**\n   __"));
    }

    #[test]
    fn numeric_deadline_files_exam_under_today() {
        let today = day(2024, 3, 6);
        let payload = json!([{"Subject": "Math", "Deadline": 1_709_546_400_000_i64, "Date": "2024-03-10"}]);
        let FormattedOutput::Days(blocks) = format_exams(&payload, Warsaw, today) else {
            panic!("expected day blocks");
        };
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Wednesday, 6 March 2024"), "{}", blocks[0]);
    }

    #[test]
    fn empty_payload_reports_not_found() {
        assert_eq!(
            format_exams(&json!([]), Warsaw, day(2024, 1, 1)),
            FormattedOutput::NotFound("❌ Nie znaleziono testow.".into())
        );
        assert_eq!(
            format_exams(&json!(null), Warsaw, day(2024, 1, 1)).diagnostic(),
            Some("❌ Nie otrzymano danych o testach.")
        );
    }
}
