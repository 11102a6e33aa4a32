use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::lucky_number::{LuckyNumber, LuckyNumberOutcome};
use crate::service::dates::{format_long_date, resolve_date_value};

pub const UNAVAILABLE_MESSAGE: &str = "❌ Nie udalo sie pobrac numerka.";

const VALUE_FIELDS: &[&str] = &["LuckyNumber", "Number", "Value"];

pub fn extract_lucky_number(payload: &Value, tz: Tz, today: NaiveDate) -> LuckyNumberOutcome {
    match payload {
        Value::Null => LuckyNumberOutcome::Unavailable,
        Value::Number(_) => LuckyNumberOutcome::Available(LuckyNumber {
            value: Some(payload.clone()),
            date: today,
        }),
        Value::Object(map) => {
            // Some provider versions nest the fields one level down.
            let source = match map.get("Envelope") {
                Some(inner @ Value::Object(_)) if !has_value_field(payload) => inner,
                _ => payload,
            };
            let value = VALUE_FIELDS
                .iter()
                .filter_map(|key| source.get(*key))
                .find(|v| !v.is_null())
                .cloned();
            let date = source
                .get("Date")
                .and_then(|date| resolve_date_value(date, tz))
                .unwrap_or(today);
            LuckyNumberOutcome::Available(LuckyNumber { value, date })
        }
        _ => LuckyNumberOutcome::Available(LuckyNumber { value: None, date: today }),
    }
}

fn has_value_field(payload: &Value) -> bool {
    VALUE_FIELDS.iter().any(|key| payload.get(*key).is_some_and(|v| !v.is_null()))
}

pub fn render_lucky_number(lucky: &LuckyNumber) -> String {
    format!(
        "🎲 Numerek na {}: **{}**",
        format_long_date(lucky.date),
        lucky.display_value()
    )
}
