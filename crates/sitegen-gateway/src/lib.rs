//! HTTP request handling for sitegen.
//!
//! Frames [`sitegen_orchestrator::OrchestrationResult`]s as HTTP responses;
//! the orchestrator itself knows nothing about status codes.

/// Router and handlers.
pub mod server;

pub use server::{status_for, AppState, GatewayServer};
