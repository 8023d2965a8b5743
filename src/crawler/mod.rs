//! Crawl job pipeline
//!
//! This module contains the core harvesting logic:
//! - Launching the remote crawl job
//! - Polling its status with progress reporting
//! - Aggregating the final pages
//! - Overall run coordination

mod aggregator;
mod coordinator;
mod launcher;
mod poller;
mod progress;

pub use aggregator::{aggregate, retrieve_final_pages, FinalPages, ResultSource};
pub use coordinator::{HarvestOptions, HarvestReport, Harvester};
pub use launcher::launch_job;
pub use poller::{poll_until_terminal, PollSettings, NO_ERROR_DETAIL};
pub use progress::{format_status_line, ProgressTracker};

use crate::config::Config;
use crate::service::FirecrawlService;
use crate::HarvestError;

/// Runs a complete harvest against the Firecrawl API
///
/// This is the main entry point. It will:
/// 1. Build the HTTP service client
/// 2. Start the crawl job
/// 3. Poll until the job finishes
/// 4. Write the aggregated document
///
/// Ctrl+C ends the run with `HarvestError::Cancelled`.
///
/// # Arguments
///
/// * `config` - A validated configuration with the API key set
pub async fn harvest(config: &Config) -> Result<HarvestReport, HarvestError> {
    let service =
        FirecrawlService::new(&config.service).map_err(HarvestError::LaunchTransport)?;
    let harvester = Harvester::new(service, HarvestOptions::from_config(config));
    harvester.run_until_interrupted().await
}
