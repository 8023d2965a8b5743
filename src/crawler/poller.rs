//! Status poller
//!
//! Polls a running job at a fixed interval until it reaches a terminal
//! state. Failed status checks are logged and retried after the same
//! interval; they never end the loop unless a failure ceiling is configured.

use crate::config::PollingConfig;
use crate::crawler::progress::ProgressTracker;
use crate::service::{CrawlService, JobHandle, StatusSnapshot};
use crate::state::JobPhase;
use crate::HarvestError;
use std::time::Duration;

/// Detail reported when a failed job carries no error message
pub const NO_ERROR_DETAIL: &str = "No details provided";

/// Poll loop timing and retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between consecutive status checks
    pub interval: Duration,

    /// Stop after this many failed checks in a row; `None` retries forever
    pub max_consecutive_failures: Option<u32>,
}

impl PollSettings {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_consecutive_failures: None,
        }
    }
}

impl From<&PollingConfig> for PollSettings {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval_duration(),
            max_consecutive_failures: config.max_consecutive_failures,
        }
    }
}

/// Counts one more failed status check, pinning at `u32::MAX`
fn bump_failures(count: u32) -> u32 {
    count.saturating_add(1)
}

/// Polls the job until it completes
///
/// # Returns
///
/// * `Ok(StatusSnapshot)` - The snapshot that reported `completed`
/// * `Err(HarvestError::JobFailed)` - The job failed, was cancelled or errored
/// * `Err(HarvestError::UnknownStatus)` - The service reported an unrecognized status
/// * `Err(HarvestError::PollRetriesExhausted)` - Only with a failure ceiling set
pub async fn poll_until_terminal<S>(
    service: &S,
    job: &JobHandle,
    settings: &PollSettings,
) -> Result<StatusSnapshot, HarvestError>
where
    S: CrawlService + ?Sized,
{
    tracing::info!(
        "Polling job status every {} seconds...",
        settings.interval.as_secs_f64()
    );

    let mut tracker = ProgressTracker::new();
    let mut consecutive_failures: u32 = 0;

    loop {
        match service.get_status(job).await {
            Ok(snapshot) => {
                consecutive_failures = 0;
                tracker.report(&snapshot);

                match snapshot.status.phase() {
                    JobPhase::InProgress => {
                        tracing::debug!(job_id = %job.job_id, status = %snapshot.status, "Job still running");
                    }
                    JobPhase::Succeeded => {
                        tracing::info!(
                            "Crawl completed. {} pages discovered while polling.",
                            tracker.seen_count()
                        );
                        return Ok(snapshot);
                    }
                    JobPhase::Failed => {
                        return Err(HarvestError::JobFailed {
                            status: snapshot.status.to_string(),
                            detail: snapshot
                                .error
                                .unwrap_or_else(|| NO_ERROR_DETAIL.to_string()),
                        });
                    }
                    JobPhase::Unrecognized => {
                        return Err(HarvestError::UnknownStatus(snapshot.status.to_string()));
                    }
                }
            }
            Err(e) => {
                consecutive_failures = bump_failures(consecutive_failures);
                tracing::warn!("Error during status check: {}", e);

                if let Some(max) = settings.max_consecutive_failures {
                    if consecutive_failures >= max {
                        return Err(HarvestError::PollRetriesExhausted {
                            attempts: consecutive_failures,
                            last: e,
                        });
                    }
                }

                tracing::warn!("Retrying after delay...");
            }
        }

        tokio::time::sleep(settings.interval).await;
    }
}
