/// Job status definitions for tracking a remote crawl job
///
/// This module defines every status the crawl service may report for a job
/// and how the poll loop should react to each of them.
use std::fmt;

/// How the poll loop reacts to a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobPhase {
    /// Job is still running, keep polling
    InProgress,

    /// Job finished successfully, hand off to aggregation
    Succeeded,

    /// Job ended without usable results
    Failed,

    /// Status string outside the known set
    Unrecognized,
}

/// Represents the status of a crawl job as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    // ===== In-Progress States =====
    /// Job accepted, waiting for a worker
    Queued,

    /// Job accepted, not yet started
    Pending,

    /// Job is running
    Active,

    /// Pages are being fetched
    Scraping,

    /// Job is paused by the service
    Paused,

    /// Job is waiting on the service
    Waiting,

    // ===== Terminal Success States =====
    /// All pages have been crawled
    Completed,

    // ===== Terminal Failure States =====
    /// Job failed on the service side
    Failed,

    /// Job was cancelled
    Cancelled,

    /// Job ended with an error
    Error,

    // ===== Special States =====
    /// Any status string the service sends that is not listed above
    Unknown(String),
}

impl JobStatus {
    /// Parses a status string as sent by the service
    ///
    /// Matching is exact; anything unrecognized is preserved verbatim in
    /// `Unknown` so it can be reported.
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => Self::Queued,
            "pending" => Self::Pending,
            "active" => Self::Active,
            "scraping" => Self::Scraping,
            "paused" => Self::Paused,
            "waiting" => Self::Waiting,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "error" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Status used when the service omits the field entirely
    pub fn missing() -> Self {
        Self::Unknown("unknown".to_string())
    }

    /// Returns the wire representation of this status
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Scraping => "scraping",
            Self::Paused => "paused",
            Self::Waiting => "waiting",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
            Self::Unknown(raw) => raw,
        }
    }

    /// Classifies this status for the poll loop
    pub fn phase(&self) -> JobPhase {
        match self {
            Self::Queued
            | Self::Pending
            | Self::Active
            | Self::Scraping
            | Self::Paused
            | Self::Waiting => JobPhase::InProgress,
            Self::Completed => JobPhase::Succeeded,
            Self::Failed | Self::Cancelled | Self::Error => JobPhase::Failed,
            Self::Unknown(_) => JobPhase::Unrecognized,
        }
    }

    /// Returns true if the job reached a success or failure end state
    ///
    /// Unknown statuses also stop the poll loop but are not counted here,
    /// since the service never announced them as final.
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase(), JobPhase::Succeeded | JobPhase::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Option<&str>> for JobStatus {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_else(Self::missing)
    }
}
