//! HTTP routes for agent status, collaboration and health.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{agent_status, collaborate, health, recent_tasks};

pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/api/agents/collaborate", post(collaborate))
        .route("/api/agents/status", get(agent_status))
        .route("/api/agents/tasks", get(recent_tasks))
        .route("/health", get(health))
}
