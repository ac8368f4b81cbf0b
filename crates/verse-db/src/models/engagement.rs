//! Engagement database model

use sqlx::types::Json;
use sqlx::FromRow;

use verse_core::Comment;

/// Database model for the engagements table
///
/// The `comments` column is the JSONB serialization of the comment tree;
/// `Vec<Comment>` deserializes it directly via serde.
#[derive(Debug, Clone, FromRow)]
pub struct EngagementModel {
    pub poem_id: String,
    pub likes: i64,
    pub comments: Json<Vec<Comment>>,
}

impl EngagementModel {
    /// Number of top-level comments in the document
    #[inline]
    pub fn comment_count(&self) -> usize {
        self.comments.0.len()
    }
}
