//! Test fixtures

use verse_core::PoemId;

/// Sample comment text used across tests
pub const SAMPLE_COMMENT: &str = "Beautiful";

/// Sample reply text used across tests
pub const SAMPLE_REPLY: &str = "So true";

/// Generate a unique poem id so concurrent test runs never collide
pub fn unique_poem_id() -> PoemId {
    PoemId::new(format!("poem-{}", uuid::Uuid::new_v4()))
}
