use thiserror::Error;

use crate::enquiry::EnquiryStatus;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Validation and transition failures are deterministic and recoverable by the
/// caller (re-prompt with the offending field). `Channel` and `Store` wrap
/// collaborator failures; neither leaves a partial write behind because every
/// store operation is a single atomic call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing required input. The message names the field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("not found")]
    NotFound,

    /// A status change not permitted from the current state.
    #[error("status change {from} -> {to} is not permitted")]
    InvalidTransition {
        from: EnquiryStatus,
        to: EnquiryStatus,
    },

    /// The outbound notification channel failed or timed out.
    #[error("notification channel failed: {0}")]
    Channel(String),

    /// The backing store failed.
    #[error("store operation failed: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
