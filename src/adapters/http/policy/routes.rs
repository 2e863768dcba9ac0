//! HTTP routes for the policy compliance checker.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{analyze_policy, compare_policies, list_rules, rule_categories};

pub fn policy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/policy/analyze", post(analyze_policy))
        .route("/api/policy/rules", get(list_rules))
        .route("/api/policy/rules/categories", get(rule_categories))
        .route("/api/policy/compare", post(compare_policies))
}
