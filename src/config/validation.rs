use crate::config::types::{Config, CrawlConfig, PollingConfig, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service_config(&config.service)?;
    validate_crawl_config(&config.crawl)?;
    validate_polling_config(&config.polling)?;
    Ok(())
}

/// Validates remote service configuration
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    validate_http_url(&config.api_url, "api-url")?;

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates what to crawl
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.url.is_empty() {
        return Err(ConfigError::Validation(
            "A starting url is required".to_string(),
        ));
    }

    validate_http_url(&config.url, "url")?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates polling configuration
fn validate_polling_config(config: &PollingConfig) -> Result<(), ConfigError> {
    if config.max_consecutive_failures == Some(0) {
        return Err(ConfigError::Validation(
            "max-consecutive-failures must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a URL parses and uses http or https
fn validate_http_url(value: &str, what: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            what, value
        )));
    }

    Ok(())
}
