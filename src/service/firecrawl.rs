//! HTTP implementation of the crawl service
//!
//! This module talks to the Firecrawl v1 REST API:
//! - Building an HTTP client with per-call timeouts
//! - Starting crawl jobs
//! - Polling job status
//! - Resolving paginated results by following `next` links

use crate::config::ServiceConfig;
use crate::service::traits::{
    CrawlRequest, CrawlService, FullResult, JobAck, JobHandle, PageResult, StatusSnapshot,
};
use crate::service::types::{CrawlStatusResponse, ScrapeOptions, StartCrawlBody, StartCrawlResponse};
use crate::{ServiceError, ServiceResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

/// Builds an HTTP client for the crawl API
///
/// # Arguments
///
/// * `config` - The service configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Crawl service backed by the Firecrawl REST API
pub struct FirecrawlService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl FirecrawlService {
    /// Creates a service client from configuration
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn status_url(&self, job: &JobHandle) -> String {
        format!("{}/v1/crawl/{}", self.api_url, job.job_id)
    }

    async fn get_page(&self, url: &str) -> ServiceResult<CrawlStatusResponse> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        decode_json(resp).await
    }
}

/// Decodes a JSON body, treating an empty body or empty document as an error
async fn decode_json<T: DeserializeOwned>(resp: Response) -> ServiceResult<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ServiceError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    if body.trim().is_empty() {
        return Err(ServiceError::EmptyBody);
    }

    let value: serde_json::Value = serde_json::from_str(&body)?;
    let is_empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(ServiceError::EmptyBody);
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl CrawlService for FirecrawlService {
    async fn start_job(&self, request: &CrawlRequest) -> ServiceResult<JobAck> {
        let body = StartCrawlBody {
            url: request.url.clone(),
            limit: request.page_limit,
            scrape_options: ScrapeOptions {
                formats: vec![request.format().to_string()],
            },
        };

        let resp = self
            .client
            .post(format!("{}/v1/crawl", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let raw = resp.text().await?;

        // A rejected or unparseable acknowledgment is still an acknowledgment
        let parsed: StartCrawlResponse = if status.is_success() {
            serde_json::from_str(&raw).unwrap_or_default()
        } else {
            StartCrawlResponse::default()
        };

        tracing::debug!(http_status = status.as_u16(), "Start crawl response: {}", raw);
        if let Some(error) = &parsed.error {
            tracing::warn!("Crawl service rejected the job: {}", error);
        }

        Ok(JobAck {
            success: parsed.success,
            job_id: parsed.id,
            raw,
        })
    }

    async fn get_status(&self, job: &JobHandle) -> ServiceResult<StatusSnapshot> {
        let resp = self.get_page(&self.status_url(job)).await?;
        Ok(resp.into_snapshot())
    }

    async fn get_full_result(&self, job: &JobHandle) -> ServiceResult<FullResult> {
        let first = self.get_page(&self.status_url(job)).await?;
        // Without an explicit flag, a response carrying no error counts as success
        let success = first.success.unwrap_or(first.error.is_none()) && first.data.is_some();

        let mut visited = HashSet::new();
        let mut next = first.next.clone();
        let mut pages: Option<Vec<PageResult>> = first
            .data
            .map(|docs| docs.into_iter().map(PageResult::from).collect());

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                tracing::warn!("Pagination loop detected at {}, stopping", url);
                break;
            }

            tracing::debug!("Fetching next result page: {}", url);
            let page = self.get_page(&url).await?;
            if let Some(docs) = page.data {
                pages
                    .get_or_insert_with(Vec::new)
                    .extend(docs.into_iter().map(PageResult::from));
            }
            next = page.next;
        }

        Ok(FullResult { success, pages })
    }
}
