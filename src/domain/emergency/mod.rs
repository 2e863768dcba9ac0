//! Emergency domain - Scenarios, assessments and response plans.
//!
//! Everything here is pure: weather readings arrive from the caller and
//! plan storage lives behind a port.

mod assessment;
mod coordination;
mod errors;
mod plan;
mod scenario;
mod weather;

pub use assessment::{
    EscalationPotential, GeographicAnalysis, PopulationImpact, ResourceRequirements,
    ScenarioAnalyzer, ScenarioAssessment, SeverityAssessment, TimelineEstimates,
    WeatherAssessment,
};
pub use coordination::{AgentResponse, CoordinationStatus, MultiAgentTask};
pub use errors::ScenarioError;
pub use plan::{EmergencyResponsePlan, ResourceAllocation, ResponsePlanner, TimelineMilestone};
pub use scenario::{
    EmergencyScenario, EmergencyType, SeverityLevel, DEFAULT_DURATION_HOURS, MAX_DURATION_HOURS,
};
pub use weather::{
    alerts_from_conditions, analyze_weather_impact, synthetic_forecast, EvacuationDifficulty,
    ImpactLevel, WeatherAlert, WeatherCondition, WeatherImpact, HIGH_WIND_ALERT_MPH,
    MAX_FORECAST_HOURS,
};
