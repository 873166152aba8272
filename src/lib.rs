//! Job listing client for a third-party recruiting API.
//!
//! Fetches job listings and job details live from upstream, cleans their
//! free-text descriptions into renderable plain text, and forwards candidate
//! submissions and contact verifications unchanged.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod sanitizer;
pub mod services;
pub mod utils;

pub use error::{Error, Result};

use adapters::{ApiClient, UpstreamApi};
use config::AppConfig;
use services::{CandidateService, JobService};
use std::sync::Arc;
use std::time::Duration;

/// Services wired to one upstream client
pub struct AppState {
    pub jobs: JobService,
    pub candidates: CandidateService,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = ApiClient::new(config.api.clone())?;
        Ok(Self::with_api(Arc::new(api), config.request_timeout))
    }

    pub fn with_api(api: Arc<dyn UpstreamApi>, request_timeout: Option<Duration>) -> Self {
        Self {
            jobs: JobService::new(api.clone()),
            candidates: CandidateService::new(api),
            request_timeout,
        }
    }
}
