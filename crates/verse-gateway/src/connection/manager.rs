//! Connection manager
//!
//! Manages all active WebSocket connections using DashMap for thread-safe
//! access. Broadcasts fan out to every registered connection; the engagement
//! protocol has no per-room subscriptions, every viewer sees every update.

use super::Connection;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use verse_core::ServerEvent;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections
            .insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection
    pub fn remove_connection(&self, session_id: &str) {
        if self.connections.remove(session_id).is_some() {
            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Broadcast an event to all connections
    pub async fn broadcast(&self, event: ServerEvent) -> usize {
        let mut sent = 0;

        for entry in self.connections.iter() {
            if entry.send(event.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(event = event.kind(), sent = sent, "Event broadcast to all connections");

        sent
    }

    /// Broadcast an event to all connections except one session
    ///
    /// Used for notifications, which the originating viewer does not see.
    pub async fn broadcast_except(&self, exclude_session: &str, event: ServerEvent) -> usize {
        let mut sent = 0;

        for entry in self.connections.iter() {
            if entry.key() == exclude_session {
                continue;
            }
            if entry.send(event.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(
            event = event.kind(),
            exclude = %exclude_session,
            sent = sent,
            "Event broadcast to other connections"
        );

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get all session IDs
    pub fn all_sessions(&self) -> Vec<String> {
        self.connections.iter().map(|r| r.key().clone()).collect()
    }

    /// Check if a session exists
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }

    /// Clean up closed connections
    pub fn cleanup_closed_connections(&self) -> usize {
        let closed: Vec<String> = self
            .connections
            .iter()
            .filter(|r| r.is_closed())
            .map(|r| r.key().clone())
            .collect();

        let count = closed.len();

        for session_id in closed {
            self.remove_connection(&session_id);
        }

        if count > 0 {
            tracing::info!(count = count, "Cleaned up closed connections");
        }

        count
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
