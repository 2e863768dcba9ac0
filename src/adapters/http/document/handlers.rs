//! HTTP handlers for the document eligibility agent.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

use super::dto::{InboxRequest, InboxResponse, ProcessDocumentRequest, ProcessDocumentResponse};

/// POST /api/document/process - Classify, extract and assess a text document
pub async fn process_document(
    State(state): State<AppState>,
    body: Result<Json<ProcessDocumentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let agent = state.document_agent()?;
    let Json(req) = body?;

    let result = agent.process_document(
        &req.document_type,
        &req.document_content,
        &req.applicant_info,
    )?;
    tracing::info!(
        document_type = %result.document_type,
        requires_review = result.requires_review,
        "document processed"
    );

    Ok(Json(ProcessDocumentResponse {
        success: true,
        result,
    }))
}

/// POST /api/document/inbox - Process the latest mailbox attachments
pub async fn process_inbox(
    State(state): State<AppState>,
    body: Result<Json<InboxRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let agent = state.document_agent()?;
    let Json(req) = body?;

    let outcome = agent
        .process_inbox(&req.user_id, req.batch_size, req.program.as_deref())
        .await?;

    Ok(Json(InboxResponse {
        success: true,
        outcome,
    }))
}
