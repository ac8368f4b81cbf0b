//! WebSocket handler
//!
//! Handles WebSocket connections and message processing. Each connection gets
//! the full engagement snapshot immediately after the upgrade, then exchanges
//! intent and broadcast events until either side closes.

use crate::connection::Connection;
use crate::handlers::IntentDispatcher;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use verse_core::{ClientIntent, ServerEvent};
use verse_service::EngagementService;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    // Generate session ID
    let session_id = uuid::Uuid::new_v4().to_string();

    // Create event channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);

    // Register connection
    let connection = state
        .connection_manager()
        .add_connection(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Push the full engagement snapshot to this client only. A store failure
    // here is logged and the connection stays open without a snapshot.
    match EngagementService::new(state.service_context()).snapshot().await {
        Ok(snapshot) => {
            let event = ServerEvent::initial_data(snapshot);
            if let Ok(json) = event.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(session_id = %session_id, "Failed to send initial snapshot");
                    state.connection_manager().remove_connection(&session_id);
                    return;
                }
            }
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Failed to fetch initial snapshot");
        }
    }

    // Clone state for the receive task
    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Spawn task to receive intents from the WebSocket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Binary messages not supported, ignored"
                    );
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(session_id = %connection_recv.session_id(), "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(session_id = %connection_recv.session_id(), "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        session_id = %connection_recv.session_id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Clone for the send task
    let session_id_send = session_id.clone();

    // Spawn task to send events to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(json) = event.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        session_id = %session_id_send,
                        "Failed to send event to WebSocket"
                    );
                    break;
                }
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    // Clean up. In-flight intents from this connection are lost; there is no
    // redelivery, a reconnecting client starts over from a fresh snapshot.
    tracing::info!(session_id = %session_id, "Cleaning up connection");
    state.connection_manager().remove_connection(&session_id);
}

/// Handle a text message from the client
///
/// Malformed frames are dropped without closing the socket; a browser client
/// that sends garbage loses that intent and nothing else.
async fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let intent = match ClientIntent::from_json(text) {
        Ok(intent) => intent,
        Err(e) => {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Failed to parse intent, dropped"
            );
            return;
        }
    };

    tracing::trace!(
        session_id = %connection.session_id(),
        intent = intent.kind(),
        "Received intent"
    );

    IntentDispatcher::dispatch(state, connection, intent).await;
}
