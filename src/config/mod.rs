//! Configuration module for Crawl-Harvest
//!
//! This module handles the optional TOML configuration file, the API
//! credential from the environment, and validation of the merged settings.
//!
//! # Example
//!
//! ```no_run
//! use crawl_harvest::config::{finalize, load_api_key, load_config};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("harvest.toml")).unwrap();
//! config.crawl.url = "https://example.com".to_string();
//! let config = finalize(config, load_api_key().unwrap()).unwrap();
//! println!("Crawling at most {} pages", config.crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, OutputConfig, PollingConfig, ServiceConfig, DEFAULT_API_URL,
    DEFAULT_MAX_PAGES, DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT,
};

// Re-export parser functions
pub use parser::{
    api_key_from, default_output_path, finalize, load_api_key, load_config, resolve_output_path,
    Overrides, API_KEY_ENV,
};
pub use validation::validate;
