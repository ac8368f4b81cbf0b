//! Repository traits (ports) for data access

mod repositories;

pub use repositories::{EngagementRepository, RepoResult};
