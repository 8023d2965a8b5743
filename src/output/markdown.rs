//! Aggregated markdown document
//!
//! This module turns the final list of crawled pages into one markdown
//! document, with a source-URL header above every page, and writes it out.

use crate::service::PageResult;
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header used for pages whose source URL the service did not report
pub const UNKNOWN_SOURCE_URL: &str = "Unknown URL";

/// Separator line closing every page block
pub const BLOCK_SEPARATOR: &str = "---";

/// The concatenated pages of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateDocument {
    /// Formatted page blocks, in result order
    pub blocks: Vec<String>,

    /// Source URL of every block, in the same order
    pub included_urls: Vec<String>,
}

impl AggregateDocument {
    /// Builds a document from pages, dropping pages without content
    ///
    /// Block order follows `pages` exactly.
    pub fn from_pages(pages: &[PageResult]) -> Self {
        let mut doc = Self::default();

        for page in pages {
            let Some(content) = page.non_empty_content() else {
                continue;
            };
            let url = page.source_url.as_deref().unwrap_or(UNKNOWN_SOURCE_URL);
            doc.blocks.push(format_page_block(url, content));
            doc.included_urls.push(url.to_string());
        }

        doc
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Renders the document text
    pub fn render(&self) -> String {
        self.blocks.concat()
    }
}

/// Formats one page as a block
///
/// A block is the header line, a blank line, the content, a blank line and
/// the separator, followed by a trailing blank line.
pub fn format_page_block(source_url: &str, content: &str) -> String {
    format!(
        "# Source URL: {}\n\n{}\n\n{}\n\n",
        source_url, content, BLOCK_SEPARATOR
    )
}

/// Writes the document with a single write call
///
/// Parent directories are created when missing.
///
/// # Arguments
///
/// * `doc` - The document to write
/// * `output_path` - Destination file path
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(HarvestError::Io)` - Directory creation or write failed
pub fn write_document(doc: &AggregateDocument, output_path: &Path) -> Result<(), HarvestError> {
    let io_err = |source: std::io::Error| HarvestError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let text = doc.render();
    let mut file = File::create(output_path).map_err(io_err)?;
    file.write_all(text.as_bytes()).map_err(io_err)?;

    Ok(())
}
