//! Intent handlers
//!
//! Handles incoming client intents. Failures are logged here and never
//! propagated back to the originating client: missing reply/reaction targets
//! are dropped at debug level, everything else is a warn.

mod engagement;
mod error;

pub use engagement::EngagementHandler;
pub use error::{HandlerError, HandlerResult};

use crate::connection::Connection;
use crate::server::GatewayState;
use std::sync::Arc;
use verse_core::ClientIntent;

/// Dispatch incoming client intents to the engagement handler
pub struct IntentDispatcher;

impl IntentDispatcher {
    /// Handle an incoming client intent
    ///
    /// On success the handler has already broadcast the updated record; on
    /// failure nothing was broadcast and the sender is not informed.
    pub async fn dispatch(state: &GatewayState, connection: &Arc<Connection>, intent: ClientIntent) {
        let kind = intent.kind();

        let result = match intent {
            ClientIntent::LikePoem(poem_id) => {
                EngagementHandler::like(state, connection, poem_id).await
            }
            ClientIntent::AddComment(payload) => {
                EngagementHandler::comment(state, connection, payload).await
            }
            ClientIntent::AddReply(payload) => {
                EngagementHandler::reply(state, connection, payload).await
            }
            ClientIntent::AddReaction(payload) => {
                EngagementHandler::reaction(state, connection, payload).await
            }
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    intent = kind,
                    error = %e,
                    "Intent targeted a missing record, dropped"
                );
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %connection.session_id(),
                    intent = kind,
                    error = %e,
                    "Intent handling failed"
                );
            }
        }
    }
}
