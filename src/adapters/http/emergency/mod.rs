//! HTTP adapter for emergency scenarios, weather and response plans.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AlertsResponse, AssessmentResponse, CreateScenarioRequest, ForecastQuery, ForecastResponse,
    MilestoneView, PlanListResponse, PlanResponse, PlanView, ResourceAllocationView,
    ScenarioResponse, ScenarioView, WeatherResponse, WeatherView,
};
pub use routes::emergency_routes;
