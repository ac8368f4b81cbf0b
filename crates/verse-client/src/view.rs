//! View seam
//!
//! Rendering is an external collaborator; the sync client drives it through
//! this trait instead of touching any DOM-like structure itself.

use verse_core::{EngagementRecord, PoemId};

/// Rendering callbacks invoked by the sync client
pub trait EngagementView {
    /// Re-render the open poem's like count and comment tree
    fn render_engagement(&mut self, poem_id: &PoemId, record: &EngagementRecord);

    /// Show a transient toast for a best-effort notification
    fn show_notification(&mut self, message: &str);
}

/// No-op view for headless uses (tests, bots)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl EngagementView for NullView {
    fn render_engagement(&mut self, _poem_id: &PoemId, _record: &EngagementRecord) {}

    fn show_notification(&mut self, _message: &str) {}
}
