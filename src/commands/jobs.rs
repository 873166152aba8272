//! Job commands

use crate::models::{JobDetailResponse, JobListResponse};
use crate::services::ListJobsParams;
use crate::AppState;
use tracing::info;

use super::with_deadline;

pub async fn list_jobs(state: &AppState, params: ListJobsParams) -> Result<JobListResponse, String> {
    info!("Listing jobs (page {:?}, size {:?})", params.page, params.size);
    with_deadline(state.request_timeout, state.jobs.list_jobs(&params)).await
}

pub async fn get_job(state: &AppState, job_id: &str) -> Result<JobDetailResponse, String> {
    info!("Showing job {}", job_id);
    with_deadline(state.request_timeout, state.jobs.get_job(job_id)).await
}
