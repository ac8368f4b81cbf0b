//! # verse-service
//!
//! Application layer containing the engagement business logic.

pub mod services;

// Re-export commonly used types at crate root
pub use services::{
    ContextBuildError, EngagementService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
