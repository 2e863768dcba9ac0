//! HTTP routes for the emergency response coordinator.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    analyze_scenario, create_scenario, current_weather, get_plan, list_plans, weather_alerts,
    weather_forecast,
};

/// Scenario, weather and plan endpoints.
pub fn emergency_routes() -> Router<AppState> {
    Router::new()
        .route("/api/scenarios", post(create_scenario))
        .route("/api/scenarios/analyze", post(analyze_scenario))
        .route("/api/weather/:lat/:lon", get(current_weather))
        .route("/api/weather/:lat/:lon/forecast", get(weather_forecast))
        .route("/api/weather/:lat/:lon/alerts", get(weather_alerts))
        .route("/api/plans", get(list_plans))
        .route("/api/plans/:plan_id", get(get_plan))
}
