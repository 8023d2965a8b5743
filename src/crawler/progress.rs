//! Progress reporting for the poll loop
//!
//! Tracks what has already been reported so that repeated polls with the
//! same page count stay quiet, and each discovered URL is announced once.

use crate::service::StatusSnapshot;
use std::collections::HashSet;

/// Per-poll-loop reporting state
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last_completed: Option<u64>,
    seen_urls: HashSet<String>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this snapshot deserves a status line
    ///
    /// That is the case when the completed count changed since the last
    /// report, or when the job reached a terminal state. A reported count
    /// becomes the new baseline.
    pub fn should_report(&mut self, snapshot: &StatusSnapshot) -> bool {
        let count_changed = match snapshot.completed {
            Some(count) => self.last_completed != Some(count),
            None => false,
        };

        if count_changed {
            self.last_completed = snapshot.completed;
        }

        count_changed || snapshot.status.is_terminal()
    }

    /// Returns source URLs in this snapshot that have not been seen before
    ///
    /// URLs come back in snapshot order and are remembered.
    pub fn new_urls(&mut self, snapshot: &StatusSnapshot) -> Vec<String> {
        let Some(pages) = &snapshot.pages else {
            return Vec::new();
        };

        pages
            .iter()
            .filter_map(|p| p.source_url.as_deref())
            .filter(|url| self.seen_urls.insert(url.to_string()))
            .map(str::to_string)
            .collect()
    }

    /// Number of distinct URLs announced so far
    pub fn seen_count(&self) -> usize {
        self.seen_urls.len()
    }

    /// Emits the progress line and new-URL notices for a snapshot
    pub fn report(&mut self, snapshot: &StatusSnapshot) {
        if self.should_report(snapshot) {
            tracing::info!("{}", format_status_line(snapshot));
        }

        let urls = self.new_urls(snapshot);
        if !urls.is_empty() {
            tracing::info!("Real-time discovered pages:");
            for url in &urls {
                tracing::info!("  - {}", url);
            }
        }
    }
}

/// Formats `Status: <s>, Pages completed: <c> / <t>`
pub fn format_status_line(snapshot: &StatusSnapshot) -> String {
    let mut line = format!("Status: {}", snapshot.status);

    if let Some(completed) = snapshot.completed {
        line.push_str(&format!(", Pages completed: {}", completed));
        if let Some(total) = snapshot.total {
            line.push_str(&format!(" / {}", total));
        }
    }

    line
}
