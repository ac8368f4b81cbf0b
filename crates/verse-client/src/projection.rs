//! Engagement projection - the client-held cache of server state
//!
//! A projection mirrors the server's engagement map: seeded wholesale from
//! the initial snapshot, patched one poem at a time by update broadcasts.
//! Local intents never mutate it.
//!
//! The liked set is the one piece of client-local state: it backs the
//! "have I personally liked this poem" toggle and is not part of the
//! authoritative record (the server tracks no per-viewer identity).

use std::collections::{HashMap, HashSet};

use verse_core::{EngagementRecord, EngagementSnapshot, PoemId};

/// Client-held projection of per-poem engagement state
#[derive(Debug, Default)]
pub struct EngagementProjection {
    /// Authoritative records, mirrored from the server
    records: HashMap<PoemId, EngagementRecord>,

    /// Poems this viewer has liked locally (UI affordance only)
    liked: HashSet<PoemId>,

    /// The poem currently open in the detail view, if any
    open_poem: Option<PoemId>,
}

impl EngagementProjection {
    /// Create an empty projection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record map with a server snapshot
    ///
    /// Returns true if the currently open poem is present in the snapshot,
    /// meaning the view should re-render it.
    pub fn apply_snapshot(&mut self, snapshot: EngagementSnapshot) -> bool {
        self.records = snapshot;
        self.open_poem
            .as_ref()
            .is_some_and(|poem_id| self.records.contains_key(poem_id))
    }

    /// Patch a single poem's record from an update broadcast
    ///
    /// Returns true if the update targets the currently open poem, meaning
    /// the view should re-render it; otherwise the record is just cached.
    pub fn apply_update(&mut self, poem_id: PoemId, record: EngagementRecord) -> bool {
        let is_open = self.open_poem.as_ref() == Some(&poem_id);
        self.records.insert(poem_id, record);
        is_open
    }

    /// Mark a poem as open in the detail view
    pub fn open(&mut self, poem_id: PoemId) -> Option<&EngagementRecord> {
        self.open_poem = Some(poem_id);
        self.open_poem.as_ref().and_then(|id| self.records.get(id))
    }

    /// Close the detail view
    pub fn close(&mut self) {
        self.open_poem = None;
    }

    /// The poem currently open in the detail view
    pub fn open_poem(&self) -> Option<&PoemId> {
        self.open_poem.as_ref()
    }

    /// Get a poem's cached record
    pub fn record(&self, poem_id: &PoemId) -> Option<&EngagementRecord> {
        self.records.get(poem_id)
    }

    /// A poem's like count (0 when no record is cached)
    pub fn likes(&self, poem_id: &PoemId) -> i64 {
        self.records.get(poem_id).map_or(0, |r| r.likes)
    }

    /// A poem's comment count (0 when no record is cached)
    pub fn comment_count(&self, poem_id: &PoemId) -> usize {
        self.records.get(poem_id).map_or(0, |r| r.comments.len())
    }

    /// Mark a poem as liked by this viewer
    ///
    /// Returns false if it was already marked, in which case the caller
    /// should not send another like intent.
    pub fn mark_liked(&mut self, poem_id: &PoemId) -> bool {
        self.liked.insert(poem_id.clone())
    }

    /// Check the viewer-local liked flag
    pub fn has_liked(&self, poem_id: &PoemId) -> bool {
        self.liked.contains(poem_id)
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the projection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
