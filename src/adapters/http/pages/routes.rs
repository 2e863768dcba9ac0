//! Browser page routes.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    agents, citizen_assistant, create_scenario, dashboard, document_eligibility, index, map, plan,
    policy_compliance, reports, scenarios,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
        .route("/create_scenario", get(create_scenario))
        .route("/scenarios", get(scenarios))
        .route("/plan/:plan_id", get(plan))
        .route("/map", get(map))
        .route("/reports", get(reports))
        .route("/agents", get(agents))
        .route("/policy-compliance", get(policy_compliance))
        .route("/citizen-assistant", get(citizen_assistant))
        .route("/document-eligibility", get(document_eligibility))
}
