//! Harvest coordinator - runs launch, poll and aggregation in sequence
//!
//! This module ties the pipeline together:
//! - Starting the crawl job
//! - Polling it until a terminal state
//! - Aggregating the final pages exactly once
//! - Writing the document
//! - Stopping cleanly on operator interrupt

use crate::config::{resolve_output_path, Config};
use crate::crawler::aggregator::{aggregate, ResultSource};
use crate::crawler::launcher::launch_job;
use crate::crawler::poller::{poll_until_terminal, PollSettings};
use crate::output::write_document;
use crate::service::{CrawlRequest, CrawlService};
use crate::HarvestError;
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

/// Everything a harvest run needs besides the service
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub request: CrawlRequest,
    pub output_path: PathBuf,
    pub poll: PollSettings,
}

impl HarvestOptions {
    /// Builds run options from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            request: CrawlRequest::new(config.crawl.url.clone(), config.crawl.max_pages),
            output_path: resolve_output_path(config),
            poll: PollSettings::from(&config.polling),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub job_id: String,
    pub output_path: PathBuf,
    pub pages_written: usize,
    /// False when the document was built from last-poll data
    pub complete: bool,
}

/// Main pipeline structure
pub struct Harvester<S> {
    service: S,
    options: HarvestOptions,
}

impl<S: CrawlService> Harvester<S> {
    pub fn new(service: S, options: HarvestOptions) -> Self {
        Self { service, options }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs the full pipeline
    ///
    /// 1. Launches the job (no retry)
    /// 2. Polls until a terminal state
    /// 3. Aggregates the final pages
    /// 4. Writes the document
    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        let start_time = Instant::now();

        let job = launch_job(&self.service, &self.options.request).await?;
        let last_snapshot = poll_until_terminal(&self.service, &job, &self.options.poll).await?;
        let (doc, source) = aggregate(&self.service, &job, last_snapshot).await?;

        let output_path = &self.options.output_path;
        tracing::info!("Saving combined markdown content to: {}", output_path.display());
        write_document(&doc, output_path)?;
        tracing::info!(
            "File saved successfully ({} pages in {:?})",
            doc.len(),
            start_time.elapsed()
        );

        Ok(HarvestReport {
            job_id: job.job_id,
            output_path: output_path.clone(),
            pages_written: doc.len(),
            complete: source == ResultSource::Authoritative,
        })
    }

    /// Runs the pipeline until it finishes or `shutdown` resolves
    ///
    /// When `shutdown` wins, the in-flight request or sleep is dropped and the
    /// run ends with `HarvestError::Cancelled`. The remote job is left running.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<HarvestReport, HarvestError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.run() => result,
            _ = shutdown => {
                tracing::warn!("Polling interrupted by user.");
                Err(HarvestError::Cancelled)
            }
        }
    }

    /// Runs the pipeline until it finishes or Ctrl+C is received
    pub async fn run_until_interrupted(&self) -> Result<HarvestReport, HarvestError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}
