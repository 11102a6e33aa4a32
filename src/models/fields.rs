//! Lookups over loosely typed provider records.
//!
//! Field presence follows the provider's loose conventions: `null`, `false`,
//! `0` and `""` all count as absent.

use serde_json::Value;

pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `raw[key]` when it is present.
pub fn field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|value| is_present(value))
}

/// Scalar rendered as text. Objects and arrays have no text form.
pub fn text(value: &Value) -> Option<String> {
    if !is_present(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First key among `keys` holding a present scalar.
pub fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| field(raw, key))
        .find_map(text)
}

/// A field that is either a plain string or an object described by `inner`
/// keys (for example `Subject` or `{ "Name": ... }`). When the primary field
/// is present it decides the outcome alone; `aliases` are flat fallbacks used
/// only when it is missing.
pub fn named(raw: &Value, primary: &str, inner: &[&str], aliases: &[&str]) -> Option<String> {
    match field(raw, primary) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(obj @ Value::Object(_)) => first_text(obj, inner),
        Some(_) => None,
        None => first_text(raw, aliases),
    }
}
