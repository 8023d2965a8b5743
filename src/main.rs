//! Crawl-Harvest main entry point
//!
//! This is the command-line interface for Crawl-Harvest.

use clap::Parser;
use crawl_harvest::config::{finalize, load_api_key, load_config, Config, Overrides};
use crawl_harvest::crawler::harvest;
use crawl_harvest::{HarvestError, EXIT_SUCCESS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawl-Harvest: collect a hosted crawl into one markdown file
///
/// Starts a crawl job on the Firecrawl API, polls it until it finishes, and
/// saves the markdown of every crawled page into a single file annotated
/// with source URLs. The API key is read from FIRECRAWL_API_KEY (a .env file
/// in the working directory is loaded first).
#[derive(Parser, Debug)]
#[command(name = "crawl-harvest")]
#[command(version)]
#[command(about = "Crawl a site through Firecrawl and save its markdown", long_about = None)]
struct Cli {
    /// Starting URL (optional when the config file sets `[crawl] url`)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Output file path [default: content/raw/<host>/full_llms.txt]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum pages to crawl [default: 10]
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Polling interval in seconds [default: 5]
    #[arg(long, value_name = "SECS")]
    poll_interval: Option<u64>,

    /// Give up after this many consecutive failed status checks
    #[arg(long, value_name = "N")]
    max_poll_failures: Option<u32>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            if e.is_cancellation() {
                tracing::warn!("{}", e);
            } else {
                tracing::error!("{}", e);
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_harvest=info,warn"),
            1 => EnvFilter::new("crawl_harvest=debug,info"),
            2 => EnvFilter::new("crawl_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the configuration: file (if any), then command-line overrides,
/// then the API key from the environment
fn build_config(cli: Cli) -> Result<Config, HarvestError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    Overrides {
        url: cli.url,
        output: cli.output,
        max_pages: cli.max_pages,
        poll_interval: cli.poll_interval,
        max_poll_failures: cli.max_poll_failures,
    }
    .apply(&mut config);

    let api_key = load_api_key()?;
    Ok(finalize(config, api_key)?)
}

/// Handles the crawl: configuration errors surface before any network call
async fn run(cli: Cli) -> Result<(), HarvestError> {
    let config = build_config(cli)?;

    let report = harvest(&config).await?;
    if !report.complete {
        tracing::warn!("Output was built from partial status data and may be incomplete");
    }
    tracing::info!(
        "Harvest finished: job {}, {} pages written to {}",
        report.job_id,
        report.pages_written,
        report.output_path.display()
    );

    Ok(())
}
