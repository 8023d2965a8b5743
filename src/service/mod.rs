//! Remote crawl service boundary
//!
//! This module contains everything that crosses the network:
//! - The `CrawlService` trait the pipeline is written against
//! - The data exchanged with the service (requests, snapshots, pages)
//! - The Firecrawl REST implementation

mod firecrawl;
mod traits;
pub mod types;

pub use firecrawl::{build_http_client, FirecrawlService};
pub use traits::{
    CrawlRequest, CrawlService, FullResult, JobAck, JobHandle, PageResult, StatusSnapshot,
    MARKDOWN_FORMAT,
};
