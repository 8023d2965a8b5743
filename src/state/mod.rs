//! State module for tracking remote crawl jobs
//!
//! This module classifies the statuses a crawl job can report.
//!
//! # Components
//!
//! - `JobStatus`: The status string reported by the service
//! - `JobPhase`: What the poll loop does with a status (continue, succeed, fail, stop)

mod job_status;

// Re-export main types
pub use job_status::{JobPhase, JobStatus};
