use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// Output file name used when no path is given
const DEFAULT_OUTPUT_FILE: &str = "full_llms.txt";

/// Loads and parses a configuration file from the given path
///
/// The result is not validated yet; command-line overrides are applied
/// first and `validate` runs on the merged configuration.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawl_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Poll interval: {}s", config.polling.interval);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Reads the API credential from the environment
pub fn load_api_key() -> Result<String, ConfigError> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

/// Accepts a credential value, rejecting missing or blank ones
pub fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey(API_KEY_ENV)),
    }
}

/// Command-line values layered over the file configuration
///
/// Only the fields that are set replace what the file provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub url: Option<String>,
    pub output: Option<PathBuf>,
    pub max_pages: Option<u32>,
    pub poll_interval: Option<u64>,
    pub max_poll_failures: Option<u32>,
}

impl Overrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(url) = self.url {
            config.crawl.url = url;
        }
        if let Some(output) = self.output {
            config.output.path = Some(output);
        }
        if let Some(max_pages) = self.max_pages {
            config.crawl.max_pages = max_pages;
        }
        if let Some(interval) = self.poll_interval {
            config.polling.interval = interval;
        }
        if let Some(max) = self.max_poll_failures {
            config.polling.max_consecutive_failures = Some(max);
        }
    }
}

/// Fills in the API key and validates the merged configuration
pub fn finalize(mut config: Config, api_key: String) -> Result<Config, ConfigError> {
    config.service.api_key = api_key;
    validate(&config)?;
    Ok(config)
}

/// Derives the default output path from the start URL's host
///
/// `https://docs.example.com/intro` becomes
/// `content/raw/docs.example.com/full_llms.txt`.
pub fn default_output_path(url: &str) -> PathBuf {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "site".to_string());

    Path::new("content")
        .join("raw")
        .join(host)
        .join(DEFAULT_OUTPUT_FILE)
}

/// Returns the configured output path, or the one derived from the URL
pub fn resolve_output_path(config: &Config) -> PathBuf {
    config
        .output
        .path
        .clone()
        .unwrap_or_else(|| default_output_path(&config.crawl.url))
}
