//! API error type shared by every route.
//!
//! Handlers return `Result<_, ApiError>`. Agent errors convert through
//! `DomainError`, whose code decides the status. Every error body has the
//! shape `{"success": false, "error": <message>, "code": <CODE>}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{AssistantError, CollaborationError};
use crate::domain::compliance::ComplianceError;
use crate::domain::eligibility::EligibilityError;
use crate::domain::emergency::ScenarioError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PlanStoreError, WeatherError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message)
    }

    /// 503 for an agent that was not started.
    pub fn unavailable(agent_name: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::AgentUnavailable,
            format!("{} not available", agent_name),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::BadRequest
        | ErrorCode::UnsupportedFormat
        | ErrorCode::UnknownTaskType => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound
        | ErrorCode::PlanNotFound
        | ErrorCode::DocumentNotFound
        | ErrorCode::RulesNotFound => StatusCode::NOT_FOUND,
        ErrorCode::AgentUnavailable | ErrorCode::AiUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(status_for(err.code), err.code, err.message)
    }
}

macro_rules! via_domain_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    DomainError::from(err).into()
                }
            }
        )*
    };
}

via_domain_error!(
    ScenarioError,
    WeatherError,
    PlanStoreError,
    ComplianceError,
    AssistantError,
    EligibilityError,
    CollaborationError,
);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, "request failed: {}", self.message);
        }
        let body = ErrorResponse::new(self.code.to_string(), self.message);
        (self.status, Json(body)).into_response()
    }
}

/// Replaces 500 bodies with a generic message unless verbose errors are on.
pub async fn mask_internal_errors(State(verbose): State<bool>, response: Response) -> Response {
    if verbose || response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError,
        "Internal server error",
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::UnknownTaskType), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::PlanNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::AiUnavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorCode::RateLimited), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorCode::NoRulesLoaded), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn compliance_errors_keep_their_status() {
        let missing: ApiError = ComplianceError::DocumentNotFound("a.txt".into()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let pdf: ApiError = ComplianceError::UnsupportedFormat(".pdf".into()).into();
        assert_eq!(pdf.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_agent_message() {
        let err = ApiError::unavailable("Virtual Citizen Assistant");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message, "Virtual Citizen Assistant not available");
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "nope", "code": "BAD_REQUEST"})
        );
    }
}
