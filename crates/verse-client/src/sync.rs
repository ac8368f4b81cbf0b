//! WebSocket sync client
//!
//! Connects to the gateway, keeps an [`EngagementProjection`] reconciled
//! against server broadcasts, and sends intents fire-and-forget: there is no
//! acknowledgement protocol, an intent sent into a dead channel is simply
//! lost and a reconnecting client starts over from a fresh snapshot.

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use verse_core::{
    AddCommentIntent, AddReactionIntent, AddReplyIntent, ClientIntent, EngagementId,
    EngagementRecord, PoemId, ServerEvent,
};

use crate::error::ClientError;
use crate::projection::EngagementProjection;
use crate::view::EngagementView;

/// Outbox buffer size for pending intents
const INTENT_BUFFER_SIZE: usize = 32;

/// Realtime sync client
pub struct SyncClient {
    outbox: mpsc::Sender<ClientIntent>,
    projection: Arc<Mutex<EngagementProjection>>,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
}

impl SyncClient {
    /// Connect to a gateway and start syncing
    ///
    /// The server pushes the full engagement snapshot right after the
    /// upgrade; the projection is seeded as soon as it arrives.
    pub async fn connect<V>(url: &str, view: V) -> Result<Self, ClientError>
    where
        V: EngagementView + Send + 'static,
    {
        let (stream, _response) = connect_async(url).await?;
        let (mut ws_sink, mut ws_stream) = stream.split();

        let (outbox, mut outbox_rx) = mpsc::channel::<ClientIntent>(INTENT_BUFFER_SIZE);
        let projection = Arc::new(Mutex::new(EngagementProjection::new()));

        tracing::info!(url = %url, "Sync channel established");

        // Read task: apply every server event to the projection and drive
        // the view
        let projection_read = projection.clone();
        let read_task = tokio::spawn(async move {
            let mut view = view;
            while let Some(msg) = ws_stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        apply_server_event(&projection_read, &mut view, &text);
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed the sync channel");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Sync channel error");
                        break;
                    }
                }
            }
        });

        // Write task: serialize queued intents onto the socket
        let write_task = tokio::spawn(async move {
            while let Some(intent) = outbox_rx.recv().await {
                match intent.to_json() {
                    Ok(json) => {
                        if ws_sink.send(Message::Text(json)).await.is_err() {
                            tracing::debug!("Sync channel closed, intent dropped");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Failed to serialize intent, dropped");
                    }
                }
            }

            let _ = ws_sink.close().await;
        });

        Ok(Self {
            outbox,
            projection,
            read_task,
            write_task,
        })
    }

    /// Send a like intent for a poem
    ///
    /// Returns false without sending when this viewer already liked the poem;
    /// the liked flag is client-local and only gates the UI affordance.
    pub fn like_poem(&self, poem_id: &PoemId) -> bool {
        if !self.projection.lock().mark_liked(poem_id) {
            return false;
        }

        if let Err(e) = self.send_intent(ClientIntent::LikePoem(poem_id.clone())) {
            tracing::debug!(poem_id = %poem_id, error = %e, "Like intent dropped");
        }
        true
    }

    /// Send a comment intent
    ///
    /// Text is trimmed and must be non-empty; empty intents are never sent.
    pub fn add_comment(&self, poem_id: &PoemId, text: &str) -> Result<(), ClientError> {
        let text = non_empty(text)?;
        self.send_intent(ClientIntent::AddComment(AddCommentIntent {
            poem_id: poem_id.clone(),
            text,
        }))
    }

    /// Send a reply intent for an existing comment
    pub fn add_reply(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        text: &str,
    ) -> Result<(), ClientError> {
        let text = non_empty(text)?;
        self.send_intent(ClientIntent::AddReply(AddReplyIntent {
            poem_id: poem_id.clone(),
            comment_id,
            text,
        }))
    }

    /// Send a reaction intent for an existing comment
    pub fn add_reaction(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        emoji: &str,
    ) -> Result<(), ClientError> {
        if emoji.trim().is_empty() {
            return Err(ClientError::EmptyText);
        }
        self.send_intent(ClientIntent::AddReaction(AddReactionIntent {
            poem_id: poem_id.clone(),
            comment_id,
            emoji: emoji.to_string(),
        }))
    }

    /// Open a poem in the detail view, returning its cached record
    pub fn open_poem(&self, poem_id: PoemId) -> Option<EngagementRecord> {
        self.projection.lock().open(poem_id).cloned()
    }

    /// Close the detail view
    pub fn close_poem(&self) {
        self.projection.lock().close();
    }

    /// Check the viewer-local liked flag for a poem
    pub fn has_liked(&self, poem_id: &PoemId) -> bool {
        self.projection.lock().has_liked(poem_id)
    }

    /// Read from the projection under its lock
    pub fn with_projection<R>(&self, f: impl FnOnce(&EngagementProjection) -> R) -> R {
        f(&self.projection.lock())
    }

    /// Check whether the sync channel is still being read
    pub fn is_connected(&self) -> bool {
        !self.read_task.is_finished()
    }

    /// Close the sync channel, flushing queued intents first
    pub async fn close(self) {
        drop(self.outbox);
        let _ = self.write_task.await;
        self.read_task.abort();
    }

    fn send_intent(&self, intent: ClientIntent) -> Result<(), ClientError> {
        match self.outbox.try_send(intent) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(intent)) => {
                tracing::debug!(intent = intent.kind(), "Outbox full, intent dropped");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(ClientError::Disconnected),
        }
    }
}

impl std::fmt::Debug for SyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncClient")
            .field("connected", &self.is_connected())
            .finish()
    }
}

fn non_empty(text: &str) -> Result<String, ClientError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Apply one server frame to the projection, driving the view as needed
fn apply_server_event<V: EngagementView>(
    projection: &Arc<Mutex<EngagementProjection>>,
    view: &mut V,
    text: &str,
) {
    let event = match ServerEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to parse server event, ignored");
            return;
        }
    };

    match event {
        ServerEvent::InitialData(snapshot) => {
            let mut projection = projection.lock();
            if projection.apply_snapshot(snapshot) {
                if let Some(poem_id) = projection.open_poem().cloned() {
                    if let Some(record) = projection.record(&poem_id) {
                        view.render_engagement(&poem_id, record);
                    }
                }
            }
        }
        ServerEvent::EngagementUpdate(update) => {
            let mut projection = projection.lock();
            let poem_id = update.poem_id.clone();
            if projection.apply_update(update.poem_id, update.data) {
                if let Some(record) = projection.record(&poem_id) {
                    view.render_engagement(&poem_id, record);
                }
            }
        }
        ServerEvent::Notification(message) => {
            view.show_notification(&message);
        }
    }
}
