//! # verse-gateway
//!
//! WebSocket gateway for real-time engagement synchronization.

pub mod connection;
pub mod handlers;
pub mod server;

pub use server::{create_app, create_gateway_state, run, run_server, GatewayState};
