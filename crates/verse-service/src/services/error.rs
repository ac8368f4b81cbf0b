//! Service layer error types

use thiserror::Error;
use verse_core::DomainError;

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Domain rule violation or infrastructure failure
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if this error is a missing reply/reaction target
    ///
    /// Such intents are dropped silently (no broadcast, nothing surfaced to
    /// the sender), so callers downgrade them to debug logs.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_not_found())
    }

    /// Check if this error is a validation failure
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_validation(),
        }
    }
}

/// Service result type
pub type ServiceResult<T> = Result<T, ServiceError>;
