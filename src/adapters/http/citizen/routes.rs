//! HTTP routes for the virtual citizen assistant.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{availability, chat, classify, history, services};

pub fn citizen_routes() -> Router<AppState> {
    Router::new()
        .route("/api/citizen/chat", post(chat))
        .route("/api/citizen/history", get(history))
        .route("/api/citizen/classify", post(classify))
        .route("/api/citizen/services", get(services))
        .route("/api/citizen/availability", get(availability))
}
