//! Services module for business logic
//!
//! This module contains service implementations that coordinate
//! between the upstream adapter, the sanitizer, and commands.

pub mod candidates;
pub mod jobs;

#[cfg(test)]
pub(crate) mod testing;

pub use candidates::CandidateService;
pub use jobs::{JobService, ListJobsParams};
