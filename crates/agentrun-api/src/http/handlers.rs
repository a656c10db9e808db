//! Request handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

use agentrun_protocols::agent::{Agent, AgentDraft};
use agentrun_protocols::execution::{CostRecord, CostSummary, Execution};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of the run endpoint.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub input: String,
}

/// Acknowledgment returned by the memory-clear endpoint.
#[derive(Debug, Serialize)]
pub struct MemoryClearResponse {
    pub status: String,
    pub message: String,
}

/// Filter for the execution listing.
#[derive(Debug, Deserialize)]
pub struct ExecutionListQuery {
    pub agent_id: Option<i64>,
}

async fn load_agent(state: &AppState, agent_id: i64) -> Result<Agent, ApiError> {
    state
        .store
        .get_agent(agent_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Agent not found".to_string()))
}

/// POST /agents
pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AgentDraft>,
) -> Result<(StatusCode, Json<Agent>), ApiError> {
    let agent = state.store.create_agent(draft).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /agents
pub async fn list_agents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Agent>>, ApiError> {
    Ok(Json(state.store.list_agents().await?))
}

/// GET /agents/{agent_id}
pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
) -> Result<Json<Agent>, ApiError> {
    Ok(Json(load_agent(&state, agent_id).await?))
}

/// PUT /agents/{agent_id}
pub async fn update_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
    Json(draft): Json<AgentDraft>,
) -> Result<Json<Agent>, ApiError> {
    state
        .store
        .update_agent(agent_id, draft)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Agent not found".to_string()))
}

/// DELETE /agents/{agent_id}
pub async fn delete_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_agent(agent_id).await? {
        return Err(ApiError::NotFound("Agent not found".to_string()));
    }
    state.memory.clear(agent_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /agents/{agent_id}/run/stream
///
/// The response body is newline-delimited JSON: one event per line, tokens
/// in provider order, terminated by exactly one `end` or `error` event.
/// Unknown agents are rejected with 404 before any streaming begins.
pub async fn run_agent_stream(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
    Json(payload): Json<RunRequest>,
) -> Result<Response, ApiError> {
    let agent = load_agent(&state, agent_id).await?;
    info!(agent_id, agent_name = %agent.name, "Starting streamed run");

    let events = state.runner.run_stream(agent, payload.input);
    let body = Body::from_stream(events.map(|event| {
        let mut line = serde_json::to_string(&event).unwrap_or_else(|_| {
            r#"{"type":"error","message":"event serialization failed"}"#.to_string()
        });
        line.push('\n');
        Ok::<_, Infallible>(line)
    }));

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    )
        .into_response())
}

/// DELETE /agents/{agent_id}/memory
///
/// Idempotent: clearing an agent with no retained memory succeeds too.
pub async fn clear_memory(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
) -> Json<MemoryClearResponse> {
    state.memory.clear(agent_id);
    Json(MemoryClearResponse {
        status: "ok".to_string(),
        message: format!("Memory for agent {agent_id} was cleared"),
    })
}

/// GET /agents/{agent_id}/costs
pub async fn list_costs(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
) -> Result<Json<Vec<CostRecord>>, ApiError> {
    let costs = state.store.list_agent_costs(agent_id).await?;
    if costs.is_empty() {
        return Err(ApiError::NotFound(
            "No costs found for this agent".to_string(),
        ));
    }
    Ok(Json(costs))
}

/// GET /agents/{agent_id}/costs/summary
pub async fn cost_summary(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<i64>,
) -> Result<Json<CostSummary>, ApiError> {
    Ok(Json(state.store.summarize_agent_costs(agent_id).await?))
}

/// GET /executions
pub async fn list_executions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExecutionListQuery>,
) -> Result<Json<Vec<Execution>>, ApiError> {
    Ok(Json(state.store.list_executions(query.agent_id).await?))
}

/// GET /executions/{execution_id}
pub async fn get_execution(
    State(state): State<Arc<AppState>>,
    Path(execution_id): Path<i64>,
) -> Result<Json<Execution>, ApiError> {
    state
        .store
        .get_execution(execution_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Execution not found".to_string()))
}

/// DELETE /executions/{execution_id}
pub async fn delete_execution(
    State(state): State<Arc<AppState>>,
    Path(execution_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_execution(execution_id).await? {
        return Err(ApiError::NotFound("Execution not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
