//! Client intent events - requests to mutate shared engagement state
//!
//! An intent never mutates the sender's local state directly; the sender
//! learns the outcome solely from the resulting broadcast.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::value_objects::{EngagementId, PoemId};

/// All client-originated intent events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientIntent {
    /// Increment a poem's like counter
    LikePoem(PoemId),
    /// Append a comment to a poem
    AddComment(AddCommentIntent),
    /// Append a reply to an existing comment
    AddReply(AddReplyIntent),
    /// Increment an emoji reaction counter on a comment
    AddReaction(AddReactionIntent),
}

impl ClientIntent {
    /// The poem this intent targets
    pub fn poem_id(&self) -> &PoemId {
        match self {
            Self::LikePoem(poem_id) => poem_id,
            Self::AddComment(intent) => &intent.poem_id,
            Self::AddReply(intent) => &intent.poem_id,
            Self::AddReaction(intent) => &intent.poem_id,
        }
    }

    /// The wire name of this intent, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LikePoem(_) => "like_poem",
            Self::AddComment(_) => "add_comment",
            Self::AddReply(_) => "add_reply",
            Self::AddReaction(_) => "add_reaction",
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

/// `add_comment` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddCommentIntent {
    #[serde(rename = "poemId")]
    pub poem_id: PoemId,

    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

/// `add_reply` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddReplyIntent {
    #[serde(rename = "poemId")]
    pub poem_id: PoemId,

    #[serde(rename = "commentId")]
    pub comment_id: EngagementId,

    #[serde(rename = "replyText")]
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

/// `add_reaction` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddReactionIntent {
    #[serde(rename = "poemId")]
    pub poem_id: PoemId,

    #[serde(rename = "commentId")]
    pub comment_id: EngagementId,

    #[validate(length(min = 1, max = 64))]
    pub emoji: String,
}
