//! Locates the record list inside a provider payload.
//!
//! The provider is inconsistent: sometimes the list is the payload itself,
//! sometimes it sits under a known wrapper key, and sometimes under some
//! other key. Lookup happens in two separate passes so each can be tested on
//! its own: [`from_envelope`] checks the domain's known keys in priority
//! order, and [`scan_keys`] is the last resort that walks every key.

use serde_json::{Map, Value};

use crate::models::domain::Domain;
use crate::models::fields::field;

/// Outcome of unwrapping; an absent payload is kept apart from an empty one
/// so callers can word their diagnostics differently.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwrapped<'a> {
    Absent,
    Records(&'a [Value]),
}

impl<'a> Unwrapped<'a> {
    pub fn records(&self) -> &'a [Value] {
        match self {
            Unwrapped::Absent => &[],
            Unwrapped::Records(records) => *records,
        }
    }
}

pub fn unwrap_payload(payload: &Value, domain: Domain) -> Unwrapped<'_> {
    match payload {
        Value::Null => Unwrapped::Absent,
        Value::Array(items) => Unwrapped::Records(items),
        Value::Object(map) => Unwrapped::Records(
            from_envelope(map, domain)
                .or_else(|| scan_keys(map, domain))
                .unwrap_or(&[]),
        ),
        _ => Unwrapped::Records(&[]),
    }
}

/// First known wrapper key holding a non-empty array.
pub fn from_envelope<'a>(map: &'a Map<String, Value>, domain: Domain) -> Option<&'a [Value]> {
    domain
        .envelope_keys()
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(non_empty_array)
}

/// First key, in document order, holding a non-empty array. For lessons the
/// array's first element must also look like a lesson, so unrelated metadata
/// arrays are skipped.
pub fn scan_keys<'a>(map: &'a Map<String, Value>, domain: Domain) -> Option<&'a [Value]> {
    map.values()
        .filter_map(non_empty_array)
        .find(|items| !domain.guards_fallback_shape() || looks_like_lesson(&items[0]))
}

fn non_empty_array(value: &Value) -> Option<&[Value]> {
    value.as_array().map(Vec::as_slice).filter(|items| !items.is_empty())
}

fn looks_like_lesson(first: &Value) -> bool {
    field(first, "Subject").is_some()
        || first.get("Date").is_some_and(Value::is_object)
        || field(first, "TimeFrom").is_some()
        || field(first, "TimeSlot").is_some()
}
