use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::domain::Domain;
use crate::models::fields::{field, first_text, named};
use crate::service::dates::resolve_date;

/// A provider record normalized into its domain-specific form.
///
/// `from_raw` never fails: missing fields stay `None` and are replaced by
/// display defaults when rendering.
pub trait Record: Sized {
    const DOMAIN: Domain;

    fn from_raw(raw: &Value, tz: Tz) -> Self;

    /// Calendar day in the reference timezone, if one could be resolved.
    fn day(&self) -> Option<NaiveDate>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub subject: Option<String>,
    pub room: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Start time used for ordering; `TimeSlot.Start` wins over flat fields.
    pub sort_key: String,
    pub date: Option<NaiveDate>,
}

impl Lesson {
    const DATE_FIELDS: &'static [&'static str] = &["Date", "StartDate", "day"];
    const START_ALIASES: &'static [&'static str] = &["TimeFrom", "startTime", "Start"];
    const END_ALIASES: &'static [&'static str] = &["TimeTo", "endTime", "End"];
}

impl Record for Lesson {
    const DOMAIN: Domain = Domain::Lessons;

    fn from_raw(raw: &Value, tz: Tz) -> Self {
        let flat_start = first_text(raw, Self::START_ALIASES);
        let slot_start = field(raw, "TimeSlot").and_then(|slot| first_text(slot, &["Start"]));

        let (start, end) = match field(raw, "TimeSlot") {
            Some(slot) => (slot_start.clone(), first_text(slot, &["End"])),
            None => (flat_start.clone(), first_text(raw, Self::END_ALIASES)),
        };

        Lesson {
            subject: named(raw, "Subject", &["Name"], &["subject", "Title", "name"]),
            room: named(raw, "Room", &["Code", "Name"], &["room", "ClassRoom"]),
            start,
            end,
            sort_key: slot_start.or(flat_start).unwrap_or_default(),
            date: resolve_date(raw, Self::DATE_FIELDS, tz),
        }
    }

    fn day(&self) -> Option<NaiveDate> {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    pub subject: Option<String>,
    pub content: String,
    pub date: Option<NaiveDate>,
}

impl Record for HomeworkItem {
    const DOMAIN: Domain = Domain::Homework;

    fn from_raw(raw: &Value, tz: Tz) -> Self {
        HomeworkItem {
            subject: named(raw, "Subject", &["Name"], &[]),
            content: first_text(raw, CONTENT_FIELDS).unwrap_or_default(),
            date: resolve_date(raw, &["Date", "DeadlineDate"], tz),
        }
    }

    fn day(&self) -> Option<NaiveDate> {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub subject: Option<String>,
    pub content: String,
    pub date: Option<NaiveDate>,
}

impl Record for Exam {
    const DOMAIN: Domain = Domain::Exams;

    fn from_raw(raw: &Value, tz: Tz) -> Self {
        Exam {
            subject: named(raw, "Subject", &["Name"], &[]),
            content: first_text(raw, CONTENT_FIELDS).unwrap_or_default(),
            date: resolve_date(raw, &["Deadline", "Date"], tz),
        }
    }

    fn day(&self) -> Option<NaiveDate> {
        self.date
    }
}

const CONTENT_FIELDS: &[&str] = &["Content", "Description", "Text"];

/// Records sharing one calendar day, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<R> {
    pub date: NaiveDate,
    pub records: Vec<R>,
}

/// Result of formatting one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedOutput {
    /// The provider returned nothing at all.
    NoData(String),
    /// A payload arrived but held no records.
    NotFound(String),
    /// One text block per day, ascending.
    Days(Vec<String>),
}

impl FormattedOutput {
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            FormattedOutput::NoData(msg) | FormattedOutput::NotFound(msg) => Some(msg),
            FormattedOutput::Days(_) => None,
        }
    }
}
