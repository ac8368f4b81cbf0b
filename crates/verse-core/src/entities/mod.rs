//! Domain entities - core engagement objects

mod engagement;

pub use engagement::{Comment, EngagementRecord, Reply, MAX_EMOJI_LEN, MAX_TEXT_LEN};
