//! Trait seams for side effects and external data, enabling mocking in tests

use crate::error::DeskError;
use crate::state::{Dispute, SubmissionRecord};
use async_trait::async_trait;

/// Local key-value sink for recent submissions
#[cfg_attr(test, mockall::automock)]
pub trait HistorySink: Send {
    /// Record a submission; implementations keep only the most recent entries
    fn append(&self, record: &SubmissionRecord) -> Result<(), DeskError>;

    /// Recent submissions, newest first
    fn recent(&self) -> Result<Vec<SubmissionRecord>, DeskError>;
}

/// Best-effort clipboard
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> Result<(), DeskError>;
}

/// Read-only provider of dispute records for the list view
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisputeSource: Send + Sync {
    async fn list_disputes(&self) -> Result<Vec<Dispute>, DeskError>;
}
