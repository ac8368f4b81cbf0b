//! Engagement service
//!
//! Implements the store operations of the synchronization protocol: each
//! method validates its input, performs exactly one atomic repository call,
//! and returns the full updated record for broadcasting. No state is held in
//! memory between calls, so handlers for different connections can interleave
//! freely.

use tracing::{info, instrument};

use verse_core::entities::{Comment, Reply, MAX_EMOJI_LEN, MAX_TEXT_LEN};
use verse_core::events::EngagementSnapshot;
use verse_core::value_objects::{EngagementId, PoemId};
use verse_core::{DomainError, EngagementRecord};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the full engagement map for a newly connected client
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> ServiceResult<EngagementSnapshot> {
        let snapshot = self.ctx.engagement_repo().fetch_all().await?;
        Ok(snapshot)
    }

    /// Increment a poem's like counter
    #[instrument(skip(self))]
    pub async fn like_poem(&self, poem_id: &PoemId) -> ServiceResult<EngagementRecord> {
        validate_poem_id(poem_id)?;

        let record = self.ctx.engagement_repo().increment_likes(poem_id).await?;

        info!(poem_id = %poem_id, likes = record.likes, "Poem liked");

        Ok(record)
    }

    /// Append a comment to a poem
    ///
    /// The comment id and timestamp are assigned here, never by the client.
    #[instrument(skip(self, text))]
    pub async fn add_comment(&self, poem_id: &PoemId, text: &str) -> ServiceResult<EngagementRecord> {
        validate_poem_id(poem_id)?;
        validate_text(text)?;

        let comment = Comment::new(self.ctx.id_generator().generate(), text.to_string());
        let comment_id = comment.id;

        let record = self
            .ctx
            .engagement_repo()
            .append_comment(poem_id, &comment)
            .await?;

        info!(poem_id = %poem_id, comment_id = %comment_id, "Comment added");

        Ok(record)
    }

    /// Append a reply to an existing comment
    #[instrument(skip(self, text))]
    pub async fn add_reply(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        text: &str,
    ) -> ServiceResult<EngagementRecord> {
        validate_poem_id(poem_id)?;
        validate_text(text)?;

        let reply = Reply::new(self.ctx.id_generator().generate(), text.to_string());
        let reply_id = reply.id;

        let record = self
            .ctx
            .engagement_repo()
            .append_reply(poem_id, comment_id, &reply)
            .await?;

        info!(
            poem_id = %poem_id,
            comment_id = %comment_id,
            reply_id = %reply_id,
            "Reply added"
        );

        Ok(record)
    }

    /// Increment an emoji reaction counter on a comment
    ///
    /// Reactions accumulate without per-user dedup; repeated reactions from
    /// the same viewer all count.
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        emoji: &str,
    ) -> ServiceResult<EngagementRecord> {
        validate_poem_id(poem_id)?;
        validate_emoji(emoji)?;

        let record = self
            .ctx
            .engagement_repo()
            .bump_reaction(poem_id, comment_id, emoji)
            .await?;

        info!(
            poem_id = %poem_id,
            comment_id = %comment_id,
            emoji = %emoji,
            "Reaction added"
        );

        Ok(record)
    }
}

fn validate_poem_id(poem_id: &PoemId) -> Result<(), ServiceError> {
    if poem_id.is_empty() {
        return Err(ServiceError::Domain(DomainError::ValidationError(
            "poem id must not be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_text(text: &str) -> Result<(), ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::Domain(DomainError::EmptyText));
    }
    if text.len() > MAX_TEXT_LEN {
        return Err(ServiceError::Domain(DomainError::TextTooLong {
            max: MAX_TEXT_LEN,
        }));
    }
    Ok(())
}

fn validate_emoji(emoji: &str) -> Result<(), ServiceError> {
    if emoji.trim().is_empty() {
        return Err(ServiceError::Domain(DomainError::ValidationError(
            "emoji must not be empty".to_string(),
        )));
    }
    if emoji.len() > MAX_EMOJI_LEN {
        return Err(ServiceError::Domain(DomainError::TextTooLong {
            max: MAX_EMOJI_LEN,
        }));
    }
    Ok(())
}
