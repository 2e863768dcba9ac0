//! HTTP handlers for scenario, weather and plan endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::emergency::MAX_FORECAST_HOURS;

use super::dto::{
    AlertsResponse, AssessmentResponse, CreateScenarioRequest, ForecastQuery, ForecastResponse,
    PlanListResponse, PlanResponse, PlanView, ScenarioResponse, ScenarioView, WeatherResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Scenarios
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/scenarios - Create a scenario and coordinate the response
pub async fn create_scenario(
    State(state): State<AppState>,
    body: Result<Json<CreateScenarioRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let Json(req) = body?;
    let scenario = req.into_scenario()?;

    let plan = coordinator.coordinate_response(&scenario).await?;

    Ok(Json(ScenarioResponse {
        success: true,
        scenario: ScenarioView::from(&scenario),
        response_plan: PlanView::from(&plan),
    }))
}

/// POST /api/scenarios/analyze - Assess a scenario without producing a plan
pub async fn analyze_scenario(
    State(state): State<AppState>,
    body: Result<Json<CreateScenarioRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let Json(req) = body?;
    let scenario = req.into_scenario()?;

    let assessment = coordinator.assess_scenario(&scenario).await;
    Ok(Json(AssessmentResponse {
        success: true,
        assessment,
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Weather
// ════════════════════════════════════════════════════════════════════════════

fn parse_coordinates(lat: &str, lon: &str) -> Result<(f64, f64), ApiError> {
    let parse = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|_| ApiError::bad_request(format!("Invalid coordinate: {}", raw)))
    };
    Ok((parse(lat)?, parse(lon)?))
}

/// GET /api/weather/:lat/:lon
pub async fn current_weather(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let (lat, lon) = parse_coordinates(&lat, &lon)?;

    let weather = coordinator.current_weather(lat, lon).await?;
    Ok(Json(WeatherResponse {
        success: true,
        weather: weather.into(),
    }))
}

/// GET /api/weather/:lat/:lon/forecast?hours=N
pub async fn weather_forecast(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
    Query(query): Query<ForecastQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let (lat, lon) = parse_coordinates(&lat, &lon)?;
    let hours = forecast_hours(query.hours)?;

    let forecast = coordinator.weather_forecast(lat, lon, hours).await?;
    Ok(Json(ForecastResponse {
        success: true,
        forecast,
    }))
}

fn forecast_hours(hours: u32) -> Result<u32, ApiError> {
    if hours > MAX_FORECAST_HOURS {
        return Err(ApiError::bad_request(format!(
            "Forecast hours must be at most {}",
            MAX_FORECAST_HOURS
        )));
    }
    Ok(hours)
}

/// GET /api/weather/:lat/:lon/alerts
pub async fn weather_alerts(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let (lat, lon) = parse_coordinates(&lat, &lon)?;

    let alerts = coordinator.weather_alerts(lat, lon).await?;
    Ok(Json(AlertsResponse {
        success: true,
        alerts,
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Plans
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/plans
pub async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let plans = coordinator.list_plans().await?;
    Ok(Json(PlanListResponse {
        success: true,
        plans: plans.iter().map(PlanView::from).collect(),
    }))
}

/// GET /api/plans/:plan_id
pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinator = state.coordinator()?;
    let plan = coordinator.get_plan(&plan_id).await?;
    Ok(Json(PlanResponse {
        success: true,
        plan: PlanView::from(&plan),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn coordinates_parse_as_floats() {
        assert_eq!(parse_coordinates("37.77", "-122.42").unwrap(), (37.77, -122.42));
    }

    #[test]
    fn malformed_coordinates_are_bad_requests() {
        let err = parse_coordinates("north", "-122.42").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forecast_hours_above_horizon_are_bad_requests() {
        assert_eq!(forecast_hours(120).unwrap(), 120);
        let err = forecast_hours(121).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
