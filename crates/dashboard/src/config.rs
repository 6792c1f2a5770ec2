//! Dashboard configuration.

use thiserror::Error;

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "LOGIDASH_API_URL";

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Where the dashboard fetches from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Absolute http(s) base URL without a trailing slash.
    pub api_url: String,
}

impl DashboardConfig {
    /// Validate and normalize a backend base URL.
    pub fn new(api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = api_url.as_ref().trim();
        let trimmed = raw.trim_end_matches('/');

        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason,
        };

        let parsed = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
        }

        Ok(Self {
            api_url: trimmed.to_string(),
        })
    }

    /// Load from a lookup function (falls back to [`DEFAULT_API_URL`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(api_url)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
