//! Application configuration
//!
//! Read once at startup from the environment (and `.env` when present),
//! then handed to the API client by value.

use reqwest::header::HeaderValue;
use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Top-level configuration for the job feed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
    /// Deadline applied around each command; the API client itself never enforces one
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("JOBS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_token = env::var("JOBS_API_TOKEN").ok();

        let request_timeout = match env::var("JOBS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("JOBS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("JOBS_LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api: ApiConfig::new(&base_url, api_token)?,
            telemetry: TelemetryConfig { log_level, log_dir },
            request_timeout,
        })
    }
}

/// Upstream endpoint and credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl ApiConfig {
    /// Validate the base URL and normalise the token (blank means unset).
    /// A token that cannot be sent as a bearer header is rejected here.
    pub fn new(base_url: &str, api_token: Option<String>) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        let api_token = api_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        if let Some(token) = &api_token {
            bearer_header(token)?;
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            api_token,
        })
    }
}

/// `Authorization` value for a bearer token
pub fn bearer_header(token: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| ConfigError::InvalidToken)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JOBS_API_BASE_URL must be an absolute http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("request timeout must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("JOBS_API_TOKEN contains characters that cannot be sent in a header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("JOBS_API_BASE_URL");
        env::remove_var("JOBS_API_TOKEN");
        env::remove_var("JOBS_REQUEST_TIMEOUT_SECS");
        env::remove_var("JOBS_LOG_LEVEL");
        env::remove_var("JOBS_LOG_DIR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.api_token, None);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.log_dir.is_none());
    }

    #[test]
    fn load_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("JOBS_API_BASE_URL", "https://jobs.example.com/v1/");
        env::set_var("JOBS_API_TOKEN", "  secret  ");
        env::set_var("JOBS_REQUEST_TIMEOUT_SECS", "15");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://jobs.example.com/v1");
        assert_eq!(config.api.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        reset_env();
    }

    #[test]
    fn load_rejects_zero_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("JOBS_REQUEST_TIMEOUT_SECS", "0");

        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));

        reset_env();
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let config = ApiConfig::new("http://localhost:9000", Some("   ".to_string())).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn rejects_token_unusable_as_header() {
        let err = ApiConfig::new("http://localhost:9000", Some("abc\ndef".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken));
        assert!(!err.to_string().contains("abc"));

        assert!(bearer_header("abc123").is_ok());
    }

    #[test]
    fn rejects_relative_or_non_http_base_url() {
        assert!(ApiConfig::new("/api", None).is_err());
        assert!(ApiConfig::new("ftp://jobs.example.com", None).is_err());
    }
}
