//! Shared helpers for the integration tests

use async_trait::async_trait;
use crawl_harvest::crawler::{HarvestOptions, PollSettings};
use crawl_harvest::service::{
    CrawlRequest, CrawlService, FullResult, JobAck, JobHandle, PageResult, StatusSnapshot,
};
use crawl_harvest::state::JobStatus;
use crawl_harvest::{ServiceError, ServiceResult};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Poll interval used by the pipeline tests
pub const TEST_INTERVAL: Duration = Duration::from_millis(10);

/// A crawl service that replays a fixed script of responses
///
/// Once the status script runs out, every further poll reports `active`.
pub struct ScriptedService {
    ack: Mutex<Option<ServiceResult<JobAck>>>,
    statuses: Mutex<VecDeque<ServiceResult<StatusSnapshot>>>,
    full_result: Mutex<Option<ServiceResult<FullResult>>>,
    pub start_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub full_result_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            ack: Mutex::new(Some(Ok(accepted("job-1")))),
            statuses: Mutex::new(VecDeque::new()),
            full_result: Mutex::new(None),
            start_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            full_result_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_ack(self, ack: ServiceResult<JobAck>) -> Self {
        *self.ack.lock().unwrap() = Some(ack);
        self
    }

    pub fn then_status(self, status: ServiceResult<StatusSnapshot>) -> Self {
        self.statuses.lock().unwrap().push_back(status);
        self
    }

    pub fn with_full_result(self, result: ServiceResult<FullResult>) -> Self {
        *self.full_result.lock().unwrap() = Some(result);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn full_result_calls(&self) -> usize {
        self.full_result_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CrawlService for ScriptedService {
    async fn start_job(&self, _request: &CrawlRequest) -> ServiceResult<JobAck> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.ack
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(accepted("job-1")))
    }

    async fn get_status(&self, _job: &JobHandle) -> ServiceResult<StatusSnapshot> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StatusSnapshot::with_status(JobStatus::Active)))
    }

    async fn get_full_result(&self, _job: &JobHandle) -> ServiceResult<FullResult> {
        self.full_result_calls.fetch_add(1, Ordering::SeqCst);
        self.full_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(ServiceError::EmptyBody))
    }
}

pub fn accepted(job_id: &str) -> JobAck {
    JobAck {
        success: true,
        job_id: Some(job_id.to_string()),
        raw: format!(r#"{{"success":true,"id":"{}"}}"#, job_id),
    }
}

pub fn page(url: &str, content: Option<&str>) -> PageResult {
    PageResult::new(url, content)
}

pub fn status(status: &str, completed: Option<u64>) -> StatusSnapshot {
    StatusSnapshot {
        completed,
        total: completed.map(|_| 10),
        ..StatusSnapshot::with_status(JobStatus::parse(status))
    }
}

pub fn completed_with(pages: Vec<PageResult>) -> StatusSnapshot {
    StatusSnapshot {
        completed: Some(pages.len() as u64),
        total: Some(pages.len() as u64),
        pages: Some(pages),
        ..StatusSnapshot::with_status(JobStatus::Completed)
    }
}

pub fn full(pages: Vec<PageResult>) -> FullResult {
    FullResult {
        success: true,
        pages: Some(pages),
    }
}

pub fn transient() -> ServiceError {
    ServiceError::Api {
        status: 502,
        message: "bad gateway".to_string(),
    }
}

pub fn options(output_path: &Path) -> HarvestOptions {
    HarvestOptions {
        request: CrawlRequest::new("https://example.com/", 10),
        output_path: output_path.to_path_buf(),
        poll: PollSettings::new(TEST_INTERVAL),
    }
}
