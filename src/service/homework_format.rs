use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::domain::Domain;
use crate::models::record::{DayGroup, FormattedOutput, HomeworkItem};
use crate::service::dates::format_long_date;
use crate::service::grouping::group_by_day;
use crate::service::lesson_format::UNKNOWN_SUBJECT;
use crate::service::unwrap::{Unwrapped, unwrap_payload};

pub fn format_homework(payload: &Value, tz: Tz, today: NaiveDate) -> FormattedOutput {
    let records = match unwrap_payload(payload, Domain::Homework) {
        Unwrapped::Absent => {
            return FormattedOutput::NoData(Domain::Homework.no_data_message().into());
        }
        Unwrapped::Records(records) => records,
    };
    if records.is_empty() {
        return FormattedOutput::NotFound(Domain::Homework.not_found_message().into());
    }

    FormattedOutput::Days(
        group_by_day::<HomeworkItem>(records, tz, today)
            .iter()
            .map(render_day)
            .collect(),
    )
}

fn render_day(group: &DayGroup<HomeworkItem>) -> String {
    let mut out = format!("\n🗓️ **{}**\n\n", format_long_date(group.date));
    for item in &group.records {
        out.push_str(&format!(
            "📖 **{}**\n   _{}_\n\n",
            item.subject.as_deref().unwrap_or(UNKNOWN_SUBJECT),
            item.content
        ));
    }
    out
}
