//! Engagement services

mod context;
mod engagement;
mod error;

pub use context::{ContextBuildError, ServiceContext, ServiceContextBuilder};
pub use engagement::EngagementService;
pub use error::{ServiceError, ServiceResult};
