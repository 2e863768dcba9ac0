//! HTTP handlers for the policy compliance checker.

use std::path::PathBuf;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

use super::dto::{
    AnalysisResponse, AnalyzePolicyRequest, CategoriesResponse, ComparePoliciesRequest,
    ComparisonResponse, PolicySource, RulesResponse,
};

/// POST /api/policy/analyze - Check a document on disk or inline text
pub async fn analyze_policy(
    State(state): State<AppState>,
    body: Result<Json<AnalyzePolicyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let checker = state.policy_checker()?;
    let Json(req) = body?;
    let requirements = req.requirements.as_deref();

    let analysis = match req.source() {
        Some(PolicySource::Path(path)) => {
            checker
                .analyze_document(&PathBuf::from(path), requirements)
                .await?
        }
        Some(PolicySource::Text(text)) => checker.analyze_policy_text(&text, requirements).await?,
        None => {
            return Err(ApiError::bad_request(
                "Either document_path or policy_text required",
            ))
        }
    };

    Ok(Json(AnalysisResponse {
        success: true,
        analysis,
    }))
}

/// GET /api/policy/rules
pub async fn list_rules(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let checker = state.policy_checker()?;
    Ok(Json(RulesResponse {
        success: true,
        rules: checker.list_available_rules().await,
    }))
}

/// GET /api/policy/rules/categories
pub async fn rule_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let checker = state.policy_checker()?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: checker.get_rule_categories().await,
    }))
}

/// POST /api/policy/compare - AI comparison of two policy texts
pub async fn compare_policies(
    State(state): State<AppState>,
    body: Result<Json<ComparePoliciesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let checker = state.policy_checker()?;
    let Json(req) = body?;
    if req.document1.trim().is_empty() || req.document2.trim().is_empty() {
        return Err(ApiError::bad_request("Both document1 and document2 required"));
    }

    let comparison = checker
        .compare_policy_texts(
            &req.document1,
            req.title1.as_deref(),
            &req.document2,
            req.title2.as_deref(),
        )
        .await?;

    Ok(Json(ComparisonResponse {
        success: true,
        comparison,
    }))
}
