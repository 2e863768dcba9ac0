//! Page handlers. Each renders a full HTML document.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::adapters::http::state::AppState;
use crate::domain::emergency::EmergencyResponsePlan;

use super::templates;

async fn stored_plans(state: &AppState) -> Vec<EmergencyResponsePlan> {
    let Some(coordinator) = state.manager.coordinator() else {
        return Vec::new();
    };
    coordinator.list_plans().await.unwrap_or_else(|e| {
        tracing::warn!("Could not list plans for page: {}", e);
        Vec::new()
    })
}

pub async fn index() -> Html<String> {
    Html(templates::index())
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    Html(templates::dashboard(&stored_plans(&state).await))
}

pub async fn create_scenario() -> Html<String> {
    Html(templates::create_scenario())
}

pub async fn scenarios(State(state): State<AppState>) -> Html<String> {
    Html(templates::scenarios(&stored_plans(&state).await))
}

pub async fn plan(State(state): State<AppState>, Path(plan_id): Path<String>) -> impl IntoResponse {
    let found = match state.manager.coordinator() {
        Some(coordinator) => coordinator.get_plan(&plan_id).await.ok(),
        None => None,
    };
    match found {
        Some(plan) => (StatusCode::OK, Html(templates::plan(&plan))),
        None => (StatusCode::NOT_FOUND, Html(templates::plan_not_found(&plan_id))),
    }
}

pub async fn map() -> Html<String> {
    Html(templates::map())
}

pub async fn reports(State(state): State<AppState>) -> Html<String> {
    Html(templates::reports(&stored_plans(&state).await))
}

pub async fn agents(State(state): State<AppState>) -> Html<String> {
    Html(templates::agents(&state.manager.status()))
}

pub async fn policy_compliance(State(state): State<AppState>) -> Html<String> {
    Html(templates::console(
        "Policy Compliance",
        "/api/policy/analyze",
        state.manager.policy_checker().is_some(),
        "policy_text",
    ))
}

pub async fn citizen_assistant(State(state): State<AppState>) -> Html<String> {
    Html(templates::console(
        "Citizen Assistant",
        "/api/citizen/chat",
        state.manager.citizen_assistant().is_some(),
        "message",
    ))
}

pub async fn document_eligibility(State(state): State<AppState>) -> Html<String> {
    Html(templates::console(
        "Document Eligibility",
        "/api/document/process",
        state.manager.document_agent().is_some(),
        "document_content",
    ))
}
