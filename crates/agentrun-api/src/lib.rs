//! HTTP API layer for AgentRun.
//!
//! Exposes agent CRUD, the streaming run endpoint (NDJSON), memory
//! management, cost queries, and execution queries over axum.

mod error;
pub mod http;
mod server;
mod state;

pub use error::ApiError;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
