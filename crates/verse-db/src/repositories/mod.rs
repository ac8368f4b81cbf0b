//! Repository implementations

mod engagement;
mod error;

pub use engagement::PgEngagementRepository;
pub use error::{comment_not_found, map_db_error};
