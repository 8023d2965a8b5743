//! Crawl-Harvest: collect a remote crawl into a single markdown file
//!
//! This crate drives a hosted crawling API. It submits a crawl job for a
//! starting URL, polls the job until it finishes, and writes the markdown of
//! every crawled page into one file annotated with source URLs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod service;
pub mod state;

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any run failure other than configuration or cancellation
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for configuration errors (detected before any network call)
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for operator cancellation (128 + SIGINT)
pub const EXIT_CANCELLED: i32 = 130;

/// Main error type for a harvest run
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start crawl job. Response: {response}")]
    LaunchRejected { response: String },

    #[error("Error starting crawl job: {0}")]
    LaunchTransport(#[source] ServiceError),

    #[error("Crawl job ended with status: {status}. Error details: {detail}")]
    JobFailed { status: String, detail: String },

    #[error("Unknown status received: {0}. Stopping.")]
    UnknownStatus(String),

    #[error("Status check failed {attempts} times in a row, giving up: {last}")]
    PollRetriesExhausted {
        attempts: u32,
        #[source]
        last: ServiceError,
    },

    #[error("Crawl job reported completed, but no final data could be retrieved or processed")]
    NoData,

    #[error("Final data processed, but no markdown content was extracted")]
    NoContent,

    #[error("Error writing file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl HarvestError {
    /// Returns the process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Cancelled => EXIT_CANCELLED,
            _ => EXIT_FAILURE,
        }
    }

    /// Returns true if the run stopped because the operator interrupted it
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),
}

/// Errors raised at the boundary with the remote crawl service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Received empty response body")]
    EmptyBody,
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for remote service calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HarvestReport, Harvester};
pub use service::{CrawlService, FirecrawlService};
pub use state::{JobPhase, JobStatus};
