//! Job launcher
//!
//! Submits the crawl job. This is a single call with no retry: a rejected or
//! failed launch means there is nothing to poll.

use crate::service::{CrawlRequest, CrawlService, JobHandle};
use crate::HarvestError;

/// Starts a crawl job and returns its handle
///
/// # Returns
///
/// * `Ok(JobHandle)` - The service accepted the job
/// * `Err(HarvestError::LaunchRejected)` - Not accepted, or no job id issued
/// * `Err(HarvestError::LaunchTransport)` - The call itself failed
pub async fn launch_job<S>(service: &S, request: &CrawlRequest) -> Result<JobHandle, HarvestError>
where
    S: CrawlService + ?Sized,
{
    tracing::info!(
        "Starting crawl job for: {} (limit: {}, format: {})...",
        request.url,
        request.page_limit,
        request.format()
    );

    let ack = service
        .start_job(request)
        .await
        .map_err(HarvestError::LaunchTransport)?;

    match ack.job_id {
        Some(id) if ack.success && !id.trim().is_empty() => {
            tracing::info!("Crawl job started successfully. Job ID: {}", id);
            Ok(JobHandle::new(id))
        }
        _ => Err(HarvestError::LaunchRejected { response: ack.raw }),
    }
}
