//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EngagementId, PoemId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Comment {comment} not found in poem {poem}")]
    CommentNotFound { poem: PoemId, comment: EngagementId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text too long: max {max} bytes")]
    TextTooLong { max: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommentNotFound { .. } => "UNKNOWN_COMMENT",
            Self::EmptyText => "EMPTY_TEXT",
            Self::TextTooLong { .. } => "TEXT_TOO_LONG",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    ///
    /// Intents targeting a missing poem or comment are dropped silently, so
    /// callers use this to decide between debug and warn logging.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommentNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::TextTooLong { .. } | Self::ValidationError(_)
        )
    }
}
