//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket connection failed
    #[error("Connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    /// Text was empty after trimming; intents with empty text are never sent
    #[error("Text must not be empty")]
    EmptyText,

    /// The sync channel is closed; the intent was dropped
    #[error("Disconnected, intent dropped")]
    Disconnected,
}
