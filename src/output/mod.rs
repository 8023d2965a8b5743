//! Output module for the aggregated crawl document
//!
//! This module handles:
//! - Formatting crawled pages into source-annotated markdown blocks
//! - Writing the combined document to disk

mod markdown;

pub use markdown::{
    format_page_block, write_document, AggregateDocument, BLOCK_SEPARATOR, UNKNOWN_SOURCE_URL,
};
