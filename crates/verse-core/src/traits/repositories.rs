//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! the implementation. Every mutating operation MUST be atomic against the
//! poem's stored document: two concurrent mutations of the same record must
//! both be reflected in the final state, never racily overwritten.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::entities::{Comment, EngagementRecord, Reply};
use crate::error::DomainError;
use crate::value_objects::{EngagementId, PoemId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Persistence port for per-poem engagement records
///
/// Each mutating method returns the full updated record so the caller can
/// broadcast it wholesale. `append_reply` and `bump_reaction` fail with
/// [`DomainError::CommentNotFound`] when the poem or target comment does not
/// exist; the other mutations upsert the record implicitly.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Fetch every engagement record, keyed by poem id
    ///
    /// Used once per client connection to build the initial snapshot.
    async fn fetch_all(&self) -> RepoResult<HashMap<PoemId, EngagementRecord>>;

    /// Increment a poem's like counter by one, creating the record if absent
    async fn increment_likes(&self, poem_id: &PoemId) -> RepoResult<EngagementRecord>;

    /// Append a comment to a poem's record, creating the record if absent
    async fn append_comment(
        &self,
        poem_id: &PoemId,
        comment: &Comment,
    ) -> RepoResult<EngagementRecord>;

    /// Append a reply to an existing comment
    async fn append_reply(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        reply: &Reply,
    ) -> RepoResult<EngagementRecord>;

    /// Increment a comment's reaction counter for the given emoji by one,
    /// creating the counter at 1 if absent
    async fn bump_reaction(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        emoji: &str,
    ) -> RepoResult<EngagementRecord>;
}
