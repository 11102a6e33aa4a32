use thiserror::Error;

/// Startup problems. Any of these aborts the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("could not read config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config line at {index}: {content}")]
    InvalidLine { content: String, index: usize },
    #[error("config file: {0}")]
    Dotenv(dotenvy::Error),
    #[error("could not extract JSON from VULCAN_APIAP")]
    ApiapNotFound,
    #[error("VULCAN_APIAP does not hold valid JSON: {0}")]
    ApiapJson(#[from] serde_json::Error),
    #[error("unknown timezone '{0}'")]
    Timezone(String),
}

/// Failures bringing the bot up after configuration was read.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("discord client: {0}")]
    Discord(#[from] serenity::Error),
}

/// Failures talking to the timetable provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} answered with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("registration response is missing {0}")]
    Registration(&'static str),
    #[error("{0}")]
    Other(String),
}

/// Failures delivering a message to the chat channel.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("discord: {0}")]
    Discord(#[from] serenity::Error),
    #[error("{0}")]
    Other(String),
}
