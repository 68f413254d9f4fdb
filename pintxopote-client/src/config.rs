/// Client configuration
///
/// # Environment Variables
///
/// - `API_URL`: Base URL of the pintxopote API (required)
/// - `API_TIMEOUT_SECONDS`: Per-request timeout (default: 30)

use std::{env, time::Duration};

use anyhow::Context;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:8080`
    pub api_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Loads configuration from the process environment, reading `.env`
    /// first if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("API_URL").context("API_URL environment variable is required")?;

        let timeout = match lookup("API_TIMEOUT_SECONDS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("API_TIMEOUT_SECONDS must be a number of seconds")?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { api_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "API_URL").then(|| "http://localhost:8080".to_string())
        })
        .unwrap();

        assert_eq!(config, ClientConfig::new("http://localhost:8080"));
    }

    #[test]
    fn test_timeout_override() {
        let config = ClientConfig::from_lookup(|key| match key {
            "API_URL" => Some("http://api".to_string()),
            "API_TIMEOUT_SECONDS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_url() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("API_URL"));
    }

    #[test]
    fn test_bad_timeout() {
        let err = ClientConfig::from_lookup(|key| match key {
            "API_URL" => Some("http://api".to_string()),
            _ => Some("soon".to_string()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("API_TIMEOUT_SECONDS"));
    }
}
