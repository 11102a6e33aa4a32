use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serenity::async_trait;

use crate::error::FetchError;
use crate::service::timetable::{TimetableSession, TimetableSource};

const DEVICE_MODEL: &str = "eduDiscord";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RegisterRequest<'a> {
    ap: &'a str,
    device_model: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(rename = "Envelope")]
    envelope: Option<RegisterEnvelope>,
}

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    #[serde(rename = "RestURL")]
    rest_url: Option<String>,
    #[serde(rename = "AccessToken", alias = "Token")]
    access_token: Option<String>,
}

/// Provider client. Holds only static configuration; every `connect`
/// performs a fresh registration.
#[derive(Debug, Clone)]
pub struct HebeClient {
    http: reqwest::Client,
    register_url: String,
    apiap: String,
}

impl HebeClient {
    pub fn new(register_url: impl Into<String>, apiap: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            register_url: register_url.into(),
            apiap: apiap.into(),
        }
    }
}

#[async_trait]
impl TimetableSource for HebeClient {
    async fn connect(&self) -> Result<Box<dyn TimetableSession>, FetchError> {
        let response = self
            .http
            .post(&self.register_url)
            .json(&RegisterRequest {
                ap: &self.apiap,
                device_model: DEVICE_MODEL,
            })
            .send()
            .await?;
        let text = read_body(&self.register_url, response).await?;
        let parsed: RegisterResponse = serde_json::from_str(&text)
            .map_err(|e| FetchError::Other(format!("failed to parse registration: {e}")))?;

        let envelope = parsed.envelope.ok_or(FetchError::Registration("Envelope"))?;
        let rest_url = envelope
            .rest_url
            .ok_or(FetchError::Registration("Envelope.RestURL"))?;
        tracing::debug!(rest_url = %rest_url, "registered with timetable provider");

        Ok(Box::new(HebeSession {
            http: self.http.clone(),
            rest_url: rest_url.trim_end_matches('/').to_string(),
            token: envelope.access_token,
        }))
    }
}

pub struct HebeSession {
    http: reqwest::Client,
    rest_url: String,
    token: Option<String>,
}

impl HebeSession {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.rest_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let text = read_body(&url, request.send().await?).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| FetchError::Other(format!("failed to parse {path}: {e}")))
    }

    async fn get_range(&self, path: &str, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError> {
        self.get(path, &[("dateFrom", iso(start)), ("dateTo", iso(end))]).await
    }
}

#[async_trait]
impl TimetableSession for HebeSession {
    async fn lessons(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError> {
        self.get_range("api/mobile/schedule/withchanges/byPupil", start, end).await
    }

    async fn lucky_number(&self, day: NaiveDate) -> Result<Value, FetchError> {
        self.get("api/mobile/school/lucky", &[("day", iso(day))]).await
    }

    async fn homework(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError> {
        self.get_range("api/mobile/homework/byPupil", start, end).await
    }

    async fn exams(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, FetchError> {
        self.get_range("api/mobile/exam/byPupil", start, end).await
    }
}

async fn read_body(endpoint: &str, response: reqwest::Response) -> Result<String, FetchError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}

fn iso(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
