use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default crawl API endpoint
pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";

/// Default per-request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default maximum number of pages to crawl
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Default poll interval (seconds)
pub const DEFAULT_POLL_INTERVAL: u64 = 5;

/// Main configuration structure for Crawl-Harvest
///
/// Every section is optional in the TOML file; command-line arguments are
/// applied on top of whatever the file provides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub crawl: CrawlConfig,
    pub polling: PollingConfig,
    pub output: OutputConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the crawl API
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Timeout for a single API call (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// API credential, only ever taken from the environment
    #[serde(skip)]
    pub api_key: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            api_key: String::new(),
        }
    }
}

/// What to crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Starting URL
    pub url: String,

    /// Maximum pages the service may crawl
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Status polling behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between status checks (seconds)
    pub interval: u64,

    /// Give up after this many consecutive failed status checks.
    /// Unset means retry forever.
    #[serde(rename = "max-consecutive-failures")]
    pub max_consecutive_failures: Option<u32>,
}

impl PollingConfig {
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_consecutive_failures: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the aggregated markdown file; derived from the URL when unset
    pub path: Option<PathBuf>,
}
