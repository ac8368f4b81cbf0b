//! Engagement intent handler
//!
//! Each handler performs one atomic store mutation through the service, then
//! broadcasts the resulting full record to every connection, including the
//! sender. Likes and comments additionally raise a notification toast for
//! everyone except the sender; replies and reactions do not.

use std::sync::Arc;
use validator::Validate;

use verse_core::{
    AddCommentIntent, AddReactionIntent, AddReplyIntent, EngagementRecord, PoemId, ServerEvent,
};
use verse_service::EngagementService;

use crate::connection::Connection;
use crate::server::GatewayState;

use super::error::{HandlerError, HandlerResult};

/// Handler for all engagement intents
pub struct EngagementHandler;

impl EngagementHandler {
    /// Handle a `like_poem` intent
    pub async fn like(
        state: &GatewayState,
        connection: &Arc<Connection>,
        poem_id: PoemId,
    ) -> HandlerResult<()> {
        let record = EngagementService::new(state.service_context())
            .like_poem(&poem_id)
            .await?;

        Self::broadcast_update(state, &poem_id, record).await;
        Self::notify_others(
            state,
            connection,
            format!("Someone loved poem #{poem_id}!"),
        )
        .await;

        Ok(())
    }

    /// Handle an `add_comment` intent
    pub async fn comment(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: AddCommentIntent,
    ) -> HandlerResult<()> {
        payload
            .validate()
            .map_err(|e| HandlerError::InvalidPayload(e.to_string()))?;

        let record = EngagementService::new(state.service_context())
            .add_comment(&payload.poem_id, &payload.text)
            .await?;

        Self::broadcast_update(state, &payload.poem_id, record).await;
        Self::notify_others(
            state,
            connection,
            format!("New comment on poem #{}", payload.poem_id),
        )
        .await;

        Ok(())
    }

    /// Handle an `add_reply` intent
    pub async fn reply(
        state: &GatewayState,
        _connection: &Arc<Connection>,
        payload: AddReplyIntent,
    ) -> HandlerResult<()> {
        payload
            .validate()
            .map_err(|e| HandlerError::InvalidPayload(e.to_string()))?;

        let record = EngagementService::new(state.service_context())
            .add_reply(&payload.poem_id, payload.comment_id, &payload.text)
            .await?;

        Self::broadcast_update(state, &payload.poem_id, record).await;

        Ok(())
    }

    /// Handle an `add_reaction` intent
    pub async fn reaction(
        state: &GatewayState,
        _connection: &Arc<Connection>,
        payload: AddReactionIntent,
    ) -> HandlerResult<()> {
        payload
            .validate()
            .map_err(|e| HandlerError::InvalidPayload(e.to_string()))?;

        let record = EngagementService::new(state.service_context())
            .add_reaction(&payload.poem_id, payload.comment_id, &payload.emoji)
            .await?;

        Self::broadcast_update(state, &payload.poem_id, record).await;

        Ok(())
    }

    /// Broadcast a poem's updated record to every connection
    async fn broadcast_update(state: &GatewayState, poem_id: &PoemId, record: EngagementRecord) {
        let sent = state
            .connection_manager()
            .broadcast(ServerEvent::engagement_update(poem_id.clone(), record))
            .await;

        tracing::trace!(poem_id = %poem_id, sent = sent, "Engagement update broadcast");
    }

    /// Send a best-effort notification to everyone except the sender
    async fn notify_others(state: &GatewayState, connection: &Arc<Connection>, message: String) {
        state
            .connection_manager()
            .broadcast_except(connection.session_id(), ServerEvent::notification(message))
            .await;
    }
}
