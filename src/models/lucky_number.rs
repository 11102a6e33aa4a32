use chrono::NaiveDate;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct LuckyNumber {
    /// `None` when the payload carried no recognizable value.
    pub value: Option<Value>,
    pub date: NaiveDate,
}

impl LuckyNumber {
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "Nieznany".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LuckyNumberOutcome {
    Unavailable,
    Available(LuckyNumber),
}
