//! Crawl service trait and the data it exchanges
//!
//! This module defines the interface to the remote crawl service. The poll
//! loop and the aggregator only ever talk to a `CrawlService`, so they can be
//! driven by a scripted implementation in tests.

use crate::state::JobStatus;
use crate::ServiceResult;
use async_trait::async_trait;

/// Output format requested from the service for every page
pub const MARKDOWN_FORMAT: &str = "markdown";

/// A crawl job to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Starting URL
    pub url: String,

    /// Maximum number of pages the service may crawl
    pub page_limit: u32,
}

impl CrawlRequest {
    pub fn new(url: impl Into<String>, page_limit: u32) -> Self {
        Self {
            url: url.into(),
            page_limit,
        }
    }

    /// The output format; always markdown
    pub fn format(&self) -> &'static str {
        MARKDOWN_FORMAT
    }
}

/// Identifies a submitted crawl job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

/// Acknowledgment returned when starting a job
#[derive(Debug, Clone)]
pub struct JobAck {
    /// Whether the service accepted the job
    pub success: bool,

    /// Job identifier, if one was issued
    pub job_id: Option<String>,

    /// Raw response body, kept for error reporting
    pub raw: String,
}

/// A single crawled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// URL the content came from
    pub source_url: Option<String>,

    /// Page content as markdown
    pub content: Option<String>,
}

impl PageResult {
    pub fn new(source_url: impl Into<String>, content: Option<&str>) -> Self {
        Self {
            source_url: Some(source_url.into()),
            content: content.map(str::to_string),
        }
    }

    /// Returns the content if it is present and non-empty
    pub fn non_empty_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// One status poll of a running job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: JobStatus,

    /// Pages completed so far
    pub completed: Option<u64>,

    /// Total pages the service expects to crawl
    pub total: Option<u64>,

    /// Pages included in this poll, possibly partial
    pub pages: Option<Vec<PageResult>>,

    /// Error detail for failed jobs
    pub error: Option<String>,
}

impl StatusSnapshot {
    /// Creates a snapshot with only a status set
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            status,
            completed: None,
            total: None,
            pages: None,
            error: None,
        }
    }
}

/// Result of the authoritative, pagination-resolving retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullResult {
    pub success: bool,
    pub pages: Option<Vec<PageResult>>,
}

/// Trait for remote crawl service implementations
///
/// Calls are made one at a time by a single task.
#[async_trait]
pub trait CrawlService: Send + Sync {
    /// Submits a crawl job
    ///
    /// A rejection by the service is reported through `JobAck::success`;
    /// only transport failures are returned as errors.
    async fn start_job(&self, request: &CrawlRequest) -> ServiceResult<JobAck>;

    /// Fetches the current status of a job
    async fn get_status(&self, job: &JobHandle) -> ServiceResult<StatusSnapshot>;

    /// Fetches every page of a finished job, following pagination
    async fn get_full_result(&self, job: &JobHandle) -> ServiceResult<FullResult>;
}
