//! Wire types for the Firecrawl v1 crawl API

use crate::service::traits::{PageResult, StatusSnapshot};
use crate::state::JobStatus;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/crawl`
#[derive(Debug, Clone, Serialize)]
pub struct StartCrawlBody {
    pub url: String,
    pub limit: u32,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: ScrapeOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
}

/// Response of `POST /v1/crawl`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartCrawlResponse {
    #[serde(default)]
    pub success: bool,
    pub id: Option<String>,
    pub error: Option<String>,
}

/// Response of `GET /v1/crawl/{id}` and of each `next` page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlStatusResponse {
    pub success: Option<bool>,
    pub status: Option<String>,
    pub completed: Option<u64>,
    pub total: Option<u64>,
    pub data: Option<Vec<PageDocument>>,
    pub error: Option<String>,
    /// URL of the next result page, if the data was paginated
    pub next: Option<String>,
}

/// A crawled page as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageDocument {
    pub markdown: Option<String>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMetadata {
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
}

impl From<PageDocument> for PageResult {
    fn from(doc: PageDocument) -> Self {
        PageResult {
            source_url: doc.metadata.source_url,
            content: doc.markdown,
        }
    }
}

impl CrawlStatusResponse {
    /// Converts the response into a snapshot, consuming its page data
    pub fn into_snapshot(self) -> StatusSnapshot {
        StatusSnapshot {
            status: JobStatus::from(self.status.as_deref()),
            completed: self.completed,
            total: self.total,
            pages: self
                .data
                .map(|docs| docs.into_iter().map(PageResult::from).collect()),
            error: self.error,
        }
    }
}
