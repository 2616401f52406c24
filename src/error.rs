//! Errors raised by side-effect sinks and data providers

use thiserror::Error;

/// Failures outside the form engine. None of these ever become form errors.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no data directory available on this platform")]
    NoDataDir,
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("dispute source failed: {0}")]
    Source(String),
}
