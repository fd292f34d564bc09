//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_STORAGE_PATH: &str = ".gym-session.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Timeouts {
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + authority, no trailing slash.
    pub base_url: String,
    /// Either empty or `/segment` with no trailing slash.
    pub api_prefix: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config from explicit values, normalizing URL and prefix.
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_prefix: normalize_prefix(api_prefix),
            timeouts: Timeouts::default(),
        })
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Replace the base URL, keeping prefix and timeouts.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_api_prefix(mut self, api_prefix: &str) -> Self {
        self.api_prefix = normalize_prefix(api_prefix);
        self
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GYM_API_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `GYM_API_PREFIX`: default empty (use `/api` behind the gateway)
    /// - `GYM_REQUEST_TIMEOUT_SECS`: default 10
    /// - `GYM_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// A zero or unparsable timeout falls back to its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("GYM_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let api_prefix = std::env::var("GYM_API_PREFIX").unwrap_or_default();
        let timeouts = Timeouts {
            request_secs: env_parse_secs("GYM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_secs("GYM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self::new(&base_url, &api_prefix)?.with_timeouts(timeouts))
    }

    /// Absolute URL for an already-normalized request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_owned()))
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}

fn env_parse_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
