//! Command handlers
//!
//! The call-site boundary that owns network egress. Each handler runs one
//! service operation under the caller's deadline (if any) and reports
//! failures as display strings.

pub mod candidates;
pub mod jobs;

pub use candidates::{submit_candidate, verify_candidate};
pub use jobs::{get_job, list_jobs};

use std::future::Future;
use std::time::Duration;

/// Await `operation`, giving up after `timeout` when one is set
pub async fn with_deadline<T, F>(timeout: Option<Duration>, operation: F) -> Result<T, String>
where
    F: Future<Output = crate::Result<T>>,
{
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| format!("request timed out after {:?}", limit))?,
        None => operation.await,
    };

    result.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_deadline_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Error>(())
        };

        let err = with_deadline(Some(Duration::from_millis(20)), slow)
            .await
            .unwrap_err();
        assert_eq!(err, "request timed out after 20ms");
    }

    #[tokio::test]
    async fn test_no_deadline_passes_result_through() {
        let ok = with_deadline(None, async { Ok::<_, Error>(7) }).await;
        assert_eq!(ok, Ok(7));

        let err = with_deadline(None, async {
            Err::<(), _>(Error::Validation("job id must not be empty".to_string()))
        })
        .await
        .unwrap_err();
        assert_eq!(err, "invalid input: job id must not be empty");
    }
}
