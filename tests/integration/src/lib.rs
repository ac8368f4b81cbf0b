//! Integration test utilities for the verse server
//!
//! This crate provides helpers for exercising the engagement protocol
//! end-to-end: an in-memory repository for concurrency properties that need
//! no database, and a test gateway for WebSocket round-trips against a real
//! PostgreSQL instance.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
