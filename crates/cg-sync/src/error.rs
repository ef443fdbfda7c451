//! Sync Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The Access System integration is not configured. A mode, not a
    /// failure: callers on the push/resolve paths swallow this into a
    /// successful no-op.
    #[error("Access System integration is not configured")]
    IntegrationDisabled,

    /// Malformed input. Never retried, surfaced immediately.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Store or network failure, including deadline expiry. Safe for the
    /// caller to retry with backoff; never retried silently in here.
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// An approved SyncRequest with no corresponding approved entry.
    /// Distinct from "not yet approved": alert-worthy, not retryable.
    #[error("Integration inconsistency: approved request {correlation_key} has no approved entry")]
    Inconsistency { correlation_key: String },
}

impl SyncError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream { message: message.into() }
    }

    pub fn inconsistency(correlation_key: impl Into<String>) -> Self {
        Self::Inconsistency { correlation_key: correlation_key.into() }
    }

    /// Whether the caller may retry the operation with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl From<mongodb::error::Error> for SyncError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Upstream { message: e.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
