//! HTTP handlers for the virtual citizen assistant.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

use super::dto::{
    AvailabilityQuery, ChatRequest, ChatResponse, ClassificationResponse, HistoryResponse,
    TextResponse,
};

/// POST /api/citizen/chat
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let assistant = state.citizen_assistant()?;
    let Json(req) = body?;

    let outcome = assistant.chat(&req.message).await?;
    tracing::info!(
        query_type = %outcome.query.query_type,
        plugins = outcome.query.plugins_used.len(),
        "citizen query answered"
    );
    Ok(Json(ChatResponse::from(outcome)))
}

/// GET /api/citizen/history
pub async fn history(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let assistant = state.citizen_assistant()?;
    Ok(Json(HistoryResponse {
        success: true,
        history: assistant.get_chat_history().await,
    }))
}

/// POST /api/citizen/classify - Intent, priority and address only
pub async fn classify(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let assistant = state.citizen_assistant()?;
    let Json(req) = body?;
    let query = assistant.classify(&req.message)?;
    Ok(Json(ClassificationResponse::from(query)))
}

/// GET /api/citizen/services
pub async fn services(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let assistant = state.citizen_assistant()?;
    Ok(Json(TextResponse::new(
        assistant.desk().list_schedulable_services(),
    )))
}

/// GET /api/citizen/availability?service=
pub async fn availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let assistant = state.citizen_assistant()?;
    if query.service.trim().is_empty() {
        return Err(ApiError::bad_request("Service required"));
    }
    Ok(Json(TextResponse::new(
        assistant.desk().check_availability(query.service.trim()),
    )))
}
