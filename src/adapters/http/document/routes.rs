//! HTTP routes for the document eligibility agent.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{process_document, process_inbox};

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/api/document/process", post(process_document))
        .route("/api/document/inbox", post(process_inbox))
}
