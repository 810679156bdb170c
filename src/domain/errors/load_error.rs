//! Image load error types.

use thiserror::Error;

/// Reasons a remote image load produced no image.
///
/// These never cross the loader boundary; callers only observe an absent
/// image. They exist for logging and for the loader's internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum LoadError {
    #[error("invalid image url: {reason}")]
    InvalidInput { reason: String },

    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    #[error("failed to decode image: {message}")]
    Decode { message: String },

    #[error("load cancelled")]
    Cancelled,
}

impl LoadError {
    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether the load was cancelled by its caller.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns whether a later retry could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Cancelled => true,
            Self::Http { status } => *status >= 500 || *status == 429,
            Self::InvalidInput { .. } | Self::Decode { .. } => false,
        }
    }
}
