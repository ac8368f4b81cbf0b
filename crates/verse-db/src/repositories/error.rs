//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use verse_core::error::DomainError;
use verse_core::value_objects::{EngagementId, PoemId};

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "comment not found" error for a reply/reaction target
pub fn comment_not_found(poem_id: &PoemId, comment_id: EngagementId) -> DomainError {
    DomainError::CommentNotFound {
        poem: poem_id.clone(),
        comment: comment_id,
    }
}
