//! Server broadcast events - pushes of authoritative engagement state
//!
//! After every successful mutation the server broadcasts the affected poem's
//! full record to every connected client, including the sender; the broadcast
//! round-trip is the only way a sender observes its own write.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::EngagementRecord;
use crate::value_objects::PoemId;

/// Full engagement map keyed by poem id, sent once per connection
pub type EngagementSnapshot = HashMap<PoemId, EngagementRecord>;

/// All server-originated events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full-state snapshot pushed to a newly connected client
    InitialData(EngagementSnapshot),
    /// One poem's updated record, broadcast to all clients
    EngagementUpdate(EngagementUpdate),
    /// Transient human-readable toast, non-authoritative
    Notification(String),
}

/// `engagement_update` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementUpdate {
    #[serde(rename = "poemId")]
    pub poem_id: PoemId,
    pub data: EngagementRecord,
}

impl ServerEvent {
    /// Create an initial snapshot event
    #[must_use]
    pub fn initial_data(snapshot: EngagementSnapshot) -> Self {
        Self::InitialData(snapshot)
    }

    /// Create an update event for a single poem
    #[must_use]
    pub fn engagement_update(poem_id: PoemId, data: EngagementRecord) -> Self {
        Self::EngagementUpdate(EngagementUpdate { poem_id, data })
    }

    /// Create a notification event
    #[must_use]
    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification(message.into())
    }

    /// The wire name of this event, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitialData(_) => "initial_data",
            Self::EngagementUpdate(_) => "engagement_update",
            Self::Notification(_) => "notification",
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
