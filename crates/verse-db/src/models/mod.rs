//! Database models

mod engagement;

pub use engagement::EngagementModel;
