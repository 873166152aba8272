//! External service adapters
//!
//! - Jobs API: authenticated JSON client for the upstream recruiting platform

pub mod jobs_api;

// Re-export commonly used types
pub use jobs_api::{request, ApiClient, RequestOptions, UpstreamApi, PLACEHOLDER_TOKEN};
