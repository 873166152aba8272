//! Candidate commands

use crate::models::{CandidatePayload, MessageResponse, VerifyPayload};
use crate::AppState;
use tracing::info;

use super::with_deadline;

pub async fn submit_candidate(
    state: &AppState,
    payload: CandidatePayload,
) -> Result<MessageResponse, String> {
    info!("Submitting candidate");
    with_deadline(state.request_timeout, state.candidates.submit_candidate(&payload)).await
}

pub async fn verify_candidate(
    state: &AppState,
    payload: VerifyPayload,
) -> Result<MessageResponse, String> {
    info!("Verifying candidate contact");
    with_deadline(state.request_timeout, state.candidates.verify_candidate(&payload)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumberOrText;
    use crate::services::testing::FakeApi;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_verify_reports_upstream_failure() {
        let fake = FakeApi::failing(StatusCode::UNAUTHORIZED, "invalid token");
        let state = AppState::with_api(fake, None);

        let payload = VerifyPayload {
            email: "a@example.com".to_string(),
            mobile: "555".to_string(),
            mobile_country_code: NumberOrText::from(1),
        };

        let err = verify_candidate(&state, payload).await.unwrap_err();
        assert_eq!(err, "upstream returned 401 Unauthorized: invalid token");
    }
}
