use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::fields::{field, text};

/// Resolves a record's calendar day from the first present field in `fields`.
///
/// Only that field is consulted: a present but unusable value (unparseable
/// text, a bare number, an array) yields `None` instead of falling through to
/// later fields.
pub fn resolve_date(raw: &Value, fields: &[&str], tz: Tz) -> Option<NaiveDate> {
    let value = fields.iter().find_map(|key| field(raw, key))?;
    resolve_date_value(value, tz)
}

/// A date given as a string, `{ "Date": "..." }` or `{ "Timestamp": ms }`.
pub fn resolve_date_value(value: &Value, tz: Tz) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_day(s, tz),
        Value::Object(_) => {
            if let Some(date) = field(value, "Date").and_then(Value::as_str) {
                parse_day(date, tz)
            } else {
                field(value, "Timestamp")
                    .and_then(timestamp_millis)
                    .and_then(|ms| day_from_millis(ms, tz))
            }
        }
        _ => None,
    }
}

fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => text(value).and_then(|s| s.trim().parse().ok()),
    }
}

pub fn day_from_millis(ms: i64, tz: Tz) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Plain dates are taken as-is; instants are converted into `tz` first.
pub fn parse_day(input: &str, tz: Tz) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&tz).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// `Monday, 4 March 2024`
pub fn format_long_date(day: NaiveDate) -> String {
    day.format("%A, %-d %B %Y").to_string()
}

/// `08:00` → `8:00 AM`. Hours that do not parse are echoed back unchanged.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return "N/A".to_string();
    }
    let mut parts = time.split(':');
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().unwrap_or_default();
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minutes} {period}")
}

/// Range header shown above multi-day output.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "\n🗓️ **{} - {}**\n",
        start.format("%-d.%m.%Y"),
        end.format("%-d.%m.%Y")
    )
}
