use std::collections::HashMap;
use std::env;

use chrono_tz::Tz;

use crate::clients::apiap::canonical_apiap;
use crate::error::ConfigError;

pub const DEFAULT_REGISTER_URL: &str = "https://lekcjaplus.vulcan.net.pl/api/mobile/register/jwt";
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";

/// Key/value pairs read from an optional `CONFIG_FILE` (dotenv syntax).
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let file_error = |err: dotenvy::Error| match err {
            dotenvy::Error::Io(source) => ConfigError::File {
                path: path.to_string(),
                source,
            },
            dotenvy::Error::LineParse(content, index) => ConfigError::InvalidLine { content, index },
            other => ConfigError::Dotenv(other),
        };
        dotenvy::from_path_iter(path)
            .map_err(file_error)?
            .map(|item| item.map_err(file_error))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment. Blank values count as unset.
    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    }
}

impl FromIterator<(String, String)> for AppConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: Option<String>,
    /// Canonical HTML wrapper around the captured auth JSON.
    pub apiap: String,
    pub register_url: String,
    pub timezone: Tz,
    pub run_mode: Option<String>,
}

impl Settings {
    pub fn load(config: &AppConfig) -> Result<Self, ConfigError> {
        let raw_apiap = config
            .prop("VULCAN_APIAP")
            .ok_or(ConfigError::Missing("VULCAN_APIAP"))?;
        let apiap = canonical_apiap(&raw_apiap)?;

        let tz_name = config
            .prop("TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = tz_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::Timezone(tz_name.clone()))?;

        Ok(Self {
            discord_token: config.prop("DISCORD_TOKEN"),
            apiap,
            register_url: config
                .prop("VULCAN_REGISTER_URL")
                .unwrap_or_else(|| DEFAULT_REGISTER_URL.to_string()),
            timezone,
            run_mode: config.prop("RUN_MODE"),
        })
    }

    pub fn require_discord_token(&self) -> Result<&str, ConfigError> {
        self.discord_token
            .as_deref()
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))
    }
}
