//! HTTP route definitions.
//!
//! ```text
//! /agents
//!   POST   /agents                        - Register agent
//!   GET    /agents                        - List agents
//!   GET    /agents/{id}                   - Get agent
//!   PUT    /agents/{id}                   - Update agent
//!   DELETE /agents/{id}                   - Delete agent (cascades executions)
//!   POST   /agents/{id}/run/stream        - Run agent, NDJSON event stream
//!   DELETE /agents/{id}/memory            - Clear short-term memory
//!   GET    /agents/{id}/costs             - List execution costs (404 when none)
//!   GET    /agents/{id}/costs/summary     - Aggregate cost statistics
//!
//! /executions
//!   GET    /executions[?agent_id=]        - List executions, newest first
//!   GET    /executions/{id}               - Get execution
//!   DELETE /executions/{id}               - Delete execution and its cost
//!
//! /health  - Liveness
//! ```

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::{handlers, monitoring};
use crate::state::AppState;

/// Create the main router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let agent_routes = Router::new()
        .route("/", post(handlers::create_agent))
        .route("/", get(handlers::list_agents))
        .route("/{agent_id}", get(handlers::get_agent))
        .route("/{agent_id}", put(handlers::update_agent))
        .route("/{agent_id}", delete(handlers::delete_agent))
        .route("/{agent_id}/run/stream", post(handlers::run_agent_stream))
        .route("/{agent_id}/memory", delete(handlers::clear_memory))
        .route("/{agent_id}/costs", get(handlers::list_costs))
        .route("/{agent_id}/costs/summary", get(handlers::cost_summary))
        .with_state(state.clone());

    let execution_routes = Router::new()
        .route("/", get(handlers::list_executions))
        .route("/{execution_id}", get(handlers::get_execution))
        .route("/{execution_id}", delete(handlers::delete_execution))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health))
        .with_state(state);

    Router::new()
        .nest("/agents", agent_routes)
        .nest("/executions", execution_routes)
        .merge(monitoring_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
