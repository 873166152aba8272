//! Error taxonomy for the job feed
//!
//! Callers can tell local validation failures apart from upstream and
//! transport failures, so a missing input never reads as an outage.

use crate::config::ConfigError;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any network call was made
    #[error("invalid input: {0}")]
    Validation(String),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Failure before a response arrived (DNS, connect, caller-imposed timeout)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Body was not JSON, did not fit the expected shape, or could not be encoded
    #[error("failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client configuration that cannot be used to build a request
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// HTTP status carried by an upstream error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_exposes_status_and_body() {
        let err = Error::Upstream {
            status: StatusCode::NOT_FOUND,
            body: "{\"detail\":\"missing\"}".to_string(),
        };

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "upstream returned 404 Not Found: {\"detail\":\"missing\"}"
        );
    }

    #[test]
    fn validation_error_has_no_status() {
        let err = Error::Validation("job id must not be empty".to_string());
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "invalid input: job id must not be empty");
    }

    #[test]
    fn config_error_is_not_validation() {
        let err = Error::from(ConfigError::InvalidToken);
        assert!(!err.is_validation());
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("invalid configuration:"));
    }
}
