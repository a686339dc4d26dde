//! Error taxonomy for lifecycle and feed operations.

use crate::types::RequestStatus;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error taxonomy for the request lifecycle and feed subsystem.
///
/// Every failure is reported to the caller immediately; the core never
/// retries internally. The web layer maps these onto HTTP status codes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Referenced request or account does not exist.
    #[error("not found")]
    NotFound,

    /// Operation is not valid for the request's current lifecycle state.
    /// Not retryable without re-fetching.
    #[error("operation not valid while request is {current}")]
    InvalidState {
        /// The state the request was observed in.
        current: RequestStatus,
    },

    /// Caller lacks the required role or ownership.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// What was missing.
        reason: String,
    },

    /// Malformed input, rejected at the boundary.
    #[error("validation failed: {reason}")]
    Validation {
        /// What was wrong with the input.
        reason: String,
    },

    /// Persistence-layer constraint violation (duplicate key and the like),
    /// surfaced as a conflict rather than swallowed.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence-layer failure, surfaced rather than swallowed.
    #[error("store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Shorthand for a forbidden error with a reason.
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Shorthand for a validation error with a reason.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
