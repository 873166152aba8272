//! Candidate submission and contact verification
//!
//! Write-only pass-through: payloads are serialized as given and posted.
//! Field formats (email, phone) are upstream's to validate. A success with
//! no body (201/204) yields an empty message.

use crate::adapters::{request, RequestOptions, UpstreamApi};
use crate::error::Result;
use crate::models::{CandidatePayload, MessageResponse, VerifyPayload};
use std::sync::Arc;
use tracing::info;

pub const CANDIDATE_PATH: &str = "/candidate";
pub const VERIFY_PATH: &str = "/candidate/verify";

#[derive(Clone)]
pub struct CandidateService {
    api: Arc<dyn UpstreamApi>,
}

impl CandidateService {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }

    pub async fn submit_candidate(&self, payload: &CandidatePayload) -> Result<MessageResponse> {
        let options = RequestOptions::post_json(payload)?;
        let response: Option<MessageResponse> =
            request(self.api.as_ref(), CANDIDATE_PATH, options).await?;
        info!("Submitted candidate");
        Ok(response.unwrap_or_default())
    }

    pub async fn verify_candidate(&self, payload: &VerifyPayload) -> Result<MessageResponse> {
        let options = RequestOptions::post_json(payload)?;
        let response: Option<MessageResponse> =
            request(self.api.as_ref(), VERIFY_PATH, options).await?;
        info!("Requested candidate contact verification");
        Ok(response.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumberOrText;
    use crate::services::testing::FakeApi;
    use reqwest::{Method, StatusCode};
    use serde_json::{json, Value};

    fn candidate() -> CandidatePayload {
        CandidatePayload {
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
            resume: "https://files.example.com/asha.pdf".to_string(),
            mobile: "9876543210".to_string(),
            mobile_country_code: NumberOrText::from(91),
            email: "not-validated-here".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_posts_payload_unchanged() {
        let fake = FakeApi::replying(json!({"message": "Candidate created"}));
        let service = CandidateService::new(fake.clone());
        let payload = candidate();

        let response = service.submit_candidate(&payload).await.unwrap();

        assert_eq!(response.message, "Candidate created");
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/candidate");
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].body, Some(serde_json::to_value(&payload).unwrap()));
    }

    #[tokio::test]
    async fn test_verify_posts_to_verify_path() {
        let fake = FakeApi::replying(json!({"message": "OTP sent"}));
        let service = CandidateService::new(fake.clone());
        let payload = VerifyPayload {
            email: "asha@example.com".to_string(),
            mobile: "9876543210".to_string(),
            mobile_country_code: NumberOrText::from("+91"),
        };

        let response = service.verify_candidate(&payload).await.unwrap();

        assert_eq!(response.message, "OTP sent");
        let calls = fake.calls();
        assert_eq!(calls[0].path, "/candidate/verify");
        assert_eq!(
            calls[0].body,
            Some(json!({
                "email": "asha@example.com",
                "mobile": "9876543210",
                "mobileCountryCode": "+91"
            }))
        );
    }

    #[tokio::test]
    async fn test_empty_success_body_is_an_empty_message() {
        let fake = FakeApi::replying(Value::Null);
        let service = CandidateService::new(fake.clone());

        let submitted = service.submit_candidate(&candidate()).await.unwrap();
        assert_eq!(submitted, MessageResponse::default());

        let payload = VerifyPayload {
            email: "asha@example.com".to_string(),
            mobile: "9876543210".to_string(),
            mobile_country_code: NumberOrText::from(91),
        };
        let verified = service.verify_candidate(&payload).await.unwrap();
        assert_eq!(verified.message, "");
        assert_eq!(fake.call_count(), 2);
    }

    #[tokio::test]
    async fn test_submit_propagates_upstream_error() {
        let fake = FakeApi::failing(StatusCode::UNPROCESSABLE_ENTITY, "invalid email");
        let service = CandidateService::new(fake);

        let err = service.submit_candidate(&candidate()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(err.to_string().contains("invalid email"));
    }
}
