use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ConfigError;

static AP_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input id="ap" type="hidden" value="(.*?)"></body>"#).expect("apiap input pattern")
});

/// Pulls the escaped JSON blob out of a captured `api/ap` page and rewraps it
/// in the minimal page the registration endpoint expects.
pub fn canonical_apiap(raw: &str) -> Result<String, ConfigError> {
    let captured = AP_INPUT
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::ApiapNotFound)?;

    let decoded = captured.replace("&quot;", "\"");
    let json: Value = serde_json::from_str(&decoded)?;
    let compact = serde_json::to_string(&json)?;

    Ok(format!(
        "<html><head></head><body><input id=\"ap\" type=\"hidden\" value='{compact}' /></body></html>"
    ))
}
