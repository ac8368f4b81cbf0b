//! Handler error types

use thiserror::Error;
use verse_service::ServiceError;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid payload received
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Service error
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl HandlerError {
    /// Check if this error is a missing reply/reaction target
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_not_found())
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
