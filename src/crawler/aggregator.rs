//! Result aggregator
//!
//! Runs once the job has completed. Fetches the full, paginated result set
//! and builds the aggregated document. When the full retrieval fails, the
//! pages from the last status poll are used instead, with a warning.

use crate::output::AggregateDocument;
use crate::service::{CrawlService, JobHandle, PageResult, StatusSnapshot};
use crate::HarvestError;

/// Where the final page list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// The dedicated full-result retrieval
    Authoritative,

    /// The page list of the last status poll; may be incomplete
    LastPoll,
}

/// Pages selected for aggregation
#[derive(Debug, Clone)]
pub struct FinalPages {
    pub pages: Vec<PageResult>,
    pub source: ResultSource,
}

/// Picks the final page list for a completed job
///
/// Returns `None` when neither the full retrieval nor the last poll
/// produced any pages.
pub async fn retrieve_final_pages<S>(
    service: &S,
    job: &JobHandle,
    last_snapshot: StatusSnapshot,
) -> Option<FinalPages>
where
    S: CrawlService + ?Sized,
{
    let authoritative = match service.get_full_result(job).await {
        Ok(result) if result.success => result.pages,
        Ok(_) => {
            tracing::warn!("Could not retrieve final paginated data: service reported no success");
            None
        }
        Err(e) => {
            tracing::warn!("Error during final result retrieval: {}", e);
            None
        }
    };

    let (pages, source) = match authoritative {
        Some(pages) => (Some(pages), ResultSource::Authoritative),
        None => {
            tracing::warn!(
                "Using data from last poll ({} pages); results may be incomplete",
                last_snapshot.pages.as_ref().map_or(0, Vec::len)
            );
            (last_snapshot.pages, ResultSource::LastPoll)
        }
    };

    match pages {
        Some(pages) if !pages.is_empty() => Some(FinalPages { pages, source }),
        _ => None,
    }
}

/// Builds the aggregated document for a completed job
///
/// # Returns
///
/// * `Ok((AggregateDocument, ResultSource))` - At least one page had content
/// * `Err(HarvestError::NoData)` - No page list could be obtained
/// * `Err(HarvestError::NoContent)` - Pages were found but none had content
pub async fn aggregate<S>(
    service: &S,
    job: &JobHandle,
    last_snapshot: StatusSnapshot,
) -> Result<(AggregateDocument, ResultSource), HarvestError>
where
    S: CrawlService + ?Sized,
{
    let final_pages = retrieve_final_pages(service, job, last_snapshot)
        .await
        .ok_or(HarvestError::NoData)?;

    tracing::info!("Processing {} final crawled pages", final_pages.pages.len());
    let doc = AggregateDocument::from_pages(&final_pages.pages);
    if doc.is_empty() {
        return Err(HarvestError::NoContent);
    }

    tracing::info!(
        "Final list of pages with extracted markdown ({} total):",
        doc.len()
    );
    for (i, url) in doc.included_urls.iter().enumerate() {
        tracing::info!("  {}. {}", i + 1, url);
    }

    Ok((doc, final_pages.source))
}
