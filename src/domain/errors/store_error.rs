//! Record store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the persistent record store.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record file {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("background task failed: {message}")]
    Task { message: String },
}

impl StoreError {
    /// Creates background task error.
    #[must_use]
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}
