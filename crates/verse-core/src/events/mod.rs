//! Wire events - the engagement synchronization protocol
//!
//! Clients mutate shared state only by sending intent events; the server
//! answers with full-record broadcast events. Both directions use JSON frames
//! tagged `{"event": ..., "data": ...}`.

mod broadcast;
mod intent;

pub use broadcast::{EngagementSnapshot, EngagementUpdate, ServerEvent};
pub use intent::{AddCommentIntent, AddReactionIntent, AddReplyIntent, ClientIntent};
