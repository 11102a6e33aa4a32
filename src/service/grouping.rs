use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::record::{DayGroup, Record};

/// Normalizes raw records and buckets them by day, ascending. Records whose
/// day cannot be resolved are filed under `today`.
pub fn group_by_day<R: Record>(raw: &[Value], tz: Tz, today: NaiveDate) -> Vec<DayGroup<R>> {
    let mut days: BTreeMap<NaiveDate, Vec<R>> = BTreeMap::new();
    for item in raw {
        let record = R::from_raw(item, tz);
        let date = record.day().unwrap_or_else(|| {
            tracing::debug!(domain = R::DOMAIN.name(), "record without usable date, filing under today");
            today
        });
        days.entry(date).or_default().push(record);
    }
    days.into_iter()
        .map(|(date, records)| DayGroup { date, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Exam;
    use chrono_tz::Europe::Warsaw;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_come_out_ascending_regardless_of_arrival() {
        let raw = json!([
            {"Subject": "C", "Deadline": "2024-03-12"},
            {"Subject": "A", "Deadline": "2024-03-10"},
            {"Subject": "B", "Deadline": "2024-03-11"},
            {"Subject": "A2", "Deadline": "2024-03-10"}
        ]);
        let groups: Vec<DayGroup<Exam>> =
            group_by_day(raw.as_array().unwrap(), Warsaw, day(2024, 1, 1));
        let dates: Vec<_> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![day(2024, 3, 10), day(2024, 3, 11), day(2024, 3, 12)]);

        let first: Vec<_> = groups[0].records.iter().map(|e| e.subject.clone().unwrap()).collect();
        assert_eq!(first, vec!["A", "A2"]);
    }

    #[test]
    fn undated_records_are_kept_under_today() {
        let today = day(2024, 5, 20);
        let raw = json!([
            {"Subject": "No date"},
            {"Subject": "Bad date", "Deadline": "next week"},
            {"Subject": "Dated", "Deadline": "2024-05-21"}
        ]);
        let groups: Vec<DayGroup<Exam>> = group_by_day(raw.as_array().unwrap(), Warsaw, today);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, today);
        assert_eq!(groups[0].records.len(), 2);
        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, 3);
    }
}
