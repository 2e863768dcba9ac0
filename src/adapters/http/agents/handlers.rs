//! HTTP handlers for agent status and collaboration.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

use super::dto::{
    CollaborateRequest, CollaborateResponse, HealthResponse, StatusResponse, TaskListResponse,
};

/// POST /api/agents/collaborate
pub async fn collaborate(
    State(state): State<AppState>,
    body: Result<Json<CollaborateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let result = state
        .manager
        .collaborate(&req.task_type, req.task_data)
        .await?;

    Ok(Json(CollaborateResponse {
        success: true,
        result,
    }))
}

/// GET /api/agents/status
pub async fn agent_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        success: true,
        report: state.manager.status(),
    })
}

/// GET /api/agents/tasks - Recent collaborations, newest first
pub async fn recent_tasks(State(state): State<AppState>) -> impl IntoResponse {
    Json(TaskListResponse {
        success: true,
        tasks: state.manager.recent_tasks().await,
    })
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
