use chrono::NaiveDate;
use serde_json::Value;
use serenity::async_trait;

use crate::error::FetchError;

/// An authenticated connection to the timetable provider.
#[async_trait]
pub trait TimetableSession: Send + Sync {
    async fn lessons(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError>;
    async fn lucky_number(&self, day: NaiveDate) -> Result<Value, FetchError>;
    async fn homework(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError>;
    async fn exams(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError>;
}

/// Performs the credential exchange. Called once per command; sessions are
/// never shared between commands.
#[async_trait]
pub trait TimetableSource: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn TimetableSession>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Lessons { start: NaiveDate, end: NaiveDate },
    LuckyNumber { day: NaiveDate },
    Homework { start: NaiveDate, end: NaiveDate },
    Exams { start: NaiveDate, end: NaiveDate },
}

impl FetchRequest {
    fn label(&self) -> &'static str {
        match self {
            FetchRequest::Lessons { .. } => "lessons",
            FetchRequest::LuckyNumber { .. } => "lucky number",
            FetchRequest::Homework { .. } => "homework",
            FetchRequest::Exams { .. } => "exams",
        }
    }
}

/// Connects and runs one request. Failures are logged and collapse to `None`.
pub async fn fetch(source: &dyn TimetableSource, request: FetchRequest) -> Option<Value> {
    match try_fetch(source, request).await {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::error!(what = request.label(), ?request, "Error fetching {}: {}", request.label(), err);
            None
        }
    }
}

async fn try_fetch(source: &dyn TimetableSource, request: FetchRequest) -> Result<Value, FetchError> {
    let session = source.connect().await?;
    match request {
        FetchRequest::Lessons { start, end } => session.lessons(start, end).await,
        FetchRequest::LuckyNumber { day } => session.lucky_number(day).await,
        FetchRequest::Homework { start, end } => session.homework(start, end).await,
        FetchRequest::Exams { start, end } => session.exams(start, end).await,
    }
}
