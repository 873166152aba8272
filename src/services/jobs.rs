//! Job listing and job detail lookups
//!
//! Both read operations fetch live from upstream and run each description
//! through the sanitizer exactly once before handing the record back.

use crate::adapters::{request, RequestOptions, UpstreamApi};
use crate::error::{Error, Result};
use crate::models::{Job, JobDetailResponse, JobListResponse};
use crate::sanitizer;
use std::sync::Arc;
use tracing::{debug, info};

pub const JOB_LIST_PATH: &str = "/job-list/";
pub const JOB_DETAIL_PATH: &str = "/job-description/";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Search parameters; omitted page and size fall back to 1 and 10
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListJobsParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Free-text search, forwarded when upstream supports it
    pub query: Option<String>,
}

impl ListJobsParams {
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "page={}&size={}",
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE)
        );

        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query.push_str("&query=");
            query.push_str(&urlencoding::encode(q));
        }

        query
    }
}

/// Read side of the job board
#[derive(Clone)]
pub struct JobService {
    api: Arc<dyn UpstreamApi>,
}

impl JobService {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }

    /// Fetch one page of jobs with cleaned descriptions
    pub async fn list_jobs(&self, params: &ListJobsParams) -> Result<JobListResponse> {
        let path = format!("{}?{}", JOB_LIST_PATH, params.to_query_string());
        debug!("Listing jobs: {}", path);

        let mut response: JobListResponse =
            request(self.api.as_ref(), &path, RequestOptions::get()).await?;

        let jobs = std::mem::take(&mut response.data.job);
        response.data.job = jobs.into_iter().map(clean_description).collect();

        info!(
            "Fetched {} jobs (total {})",
            response.data.job.len(),
            response.data.total_count
        );

        Ok(response)
    }

    /// Fetch a single job by its upstream id
    ///
    /// An empty id is rejected before anything goes over the network.
    pub async fn get_job(&self, job_id: &str) -> Result<JobDetailResponse> {
        if job_id.trim().is_empty() {
            return Err(Error::Validation("job id must not be empty".to_string()));
        }

        let path = format!("{}?job_id={}", JOB_DETAIL_PATH, urlencoding::encode(job_id));
        debug!("Fetching job {}", job_id);

        let mut response: JobDetailResponse =
            request(self.api.as_ref(), &path, RequestOptions::get()).await?;
        response.data = clean_description(std::mem::take(&mut response.data));

        Ok(response)
    }
}

fn clean_description(mut job: Job) -> Job {
    job.description = sanitizer::clean_text(&job.description);
    job
}
