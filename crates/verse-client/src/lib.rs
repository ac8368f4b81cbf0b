//! # verse-client
//!
//! Client side of the engagement synchronization protocol: a local
//! projection of the server's engagement state, a view seam for the
//! rendering layer, and a WebSocket sync client.
//!
//! The projection is populated only from server snapshots and broadcasts.
//! Sending an intent never touches it; the sender observes its own write
//! when the resulting broadcast comes back.

mod error;
mod projection;
mod sync;
mod view;

pub use error::ClientError;
pub use projection::EngagementProjection;
pub use sync::SyncClient;
pub use view::{EngagementView, NullView};
