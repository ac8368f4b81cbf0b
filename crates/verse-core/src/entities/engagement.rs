//! Engagement entities - the per-poem aggregate of likes, comments, replies,
//! and reactions
//!
//! These structs double as the persisted document shape: the `comments`
//! column of an engagement row is the JSON serialization of `Vec<Comment>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::EngagementId;

/// Maximum accepted length for comment and reply text, in bytes
pub const MAX_TEXT_LEN: usize = 2000;

/// Maximum accepted length for a reaction emoji symbol, in bytes
pub const MAX_EMOJI_LEN: usize = 64;

/// A reply to a comment
///
/// Replies cannot themselves be replied to; the absence of a nested `replies`
/// field is deliberate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: EngagementId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Reply {
    /// Create a new Reply with the current timestamp
    pub fn new(id: EngagementId, text: String) -> Self {
        Self {
            id,
            text,
            timestamp: Utc::now(),
        }
    }
}

/// A comment on a poem
///
/// `replies` and `reactions` always serialize, even when empty, so that every
/// stored comment document carries both keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EngagementId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default)]
    pub reactions: BTreeMap<String, i64>,
}

impl Comment {
    /// Create a new Comment with the current timestamp and no replies or
    /// reactions
    pub fn new(id: EngagementId, text: String) -> Self {
        Self {
            id,
            text,
            timestamp: Utc::now(),
            replies: Vec::new(),
            reactions: BTreeMap::new(),
        }
    }

    /// Look up a reply by id
    pub fn reply(&self, id: EngagementId) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }

    /// Get the accumulated count for an emoji (0 if nobody reacted with it)
    pub fn reaction_count(&self, emoji: &str) -> i64 {
        self.reactions.get(emoji).copied().unwrap_or(0)
    }
}

/// The per-poem engagement aggregate
///
/// Exactly one record exists per poem id; the record is created implicitly by
/// the first like or comment and never deleted. `likes` only increases, and
/// `comments` is append-only in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementRecord {
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl EngagementRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a comment by id
    pub fn comment(&self, id: EngagementId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Check whether a comment with the given id exists
    pub fn has_comment(&self, id: EngagementId) -> bool {
        self.comment(id).is_some()
    }

    /// Number of top-level comments (excluding replies)
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}
