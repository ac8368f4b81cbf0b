//! # verse-db
//!
//! Database layer implementing the engagement repository trait with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! Engagement records are stored as one document per poem: a row holding the
//! like counter and the comment tree as a JSONB array. Every mutating
//! repository method maps to exactly one SQL statement (upsert or in-place
//! JSONB edit) so concurrent writers targeting the same poem serialize on the
//! row lock and no update is ever lost.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use verse_db::pool::{create_pool, DatabaseConfig};
//! use verse_db::repositories::PgEngagementRepository;
//! use verse_core::traits::EngagementRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     verse_db::run_migrations(&pool).await?;
//!     let repo = PgEngagementRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgEngagementRepository;
