use serde::{Deserialize, Serialize};

use super::job::{null_as_default, NumberOrText};

/// Candidate submission, forwarded to upstream exactly as given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub resume: String,
    pub mobile: String,
    pub mobile_country_code: NumberOrText,
    pub email: String,
}

/// Contact details upstream verifies before accepting a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
    pub email: String,
    pub mobile: String,
    pub mobile_country_code: NumberOrText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
