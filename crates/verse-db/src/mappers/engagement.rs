//! Engagement model <-> entity mapper

use verse_core::{EngagementRecord, PoemId};

use crate::models::EngagementModel;

/// Convert EngagementModel to EngagementRecord entity
impl From<EngagementModel> for EngagementRecord {
    fn from(model: EngagementModel) -> Self {
        EngagementRecord {
            likes: model.likes,
            comments: model.comments.0,
        }
    }
}

/// Split a model into its map entry for snapshot assembly
pub fn into_entry(model: EngagementModel) -> (PoemId, EngagementRecord) {
    let poem_id = PoemId::new(model.poem_id.clone());
    (poem_id, EngagementRecord::from(model))
}
