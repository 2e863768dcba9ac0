//! Request and response bodies for scenario, weather and plan endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::emergency::{
    EmergencyResponsePlan, EmergencyScenario, EmergencyType, ScenarioAssessment, ScenarioError,
    SeverityLevel, TimelineMilestone, WeatherAlert, WeatherCondition,
};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScenarioRequest {
    #[serde(default)]
    pub scenario_id: Option<String>,
    pub incident_type: EmergencyType,
    pub severity_level: SeverityLevel,
    pub location: String,
    pub affected_area_radius: f64,
    pub estimated_population_affected: i64,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub special_conditions: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CreateScenarioRequest {
    /// Builds the scenario, generating a timestamped id when none is given.
    pub fn into_scenario(self) -> Result<EmergencyScenario, ScenarioError> {
        let scenario_id = self
            .scenario_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("scenario_{}", Timestamp::now().compact()));

        let mut scenario = EmergencyScenario::new(
            scenario_id,
            self.incident_type,
            self.severity_level,
            self.location,
            self.affected_area_radius,
            self.estimated_population_affected,
        )?
        .with_description(self.description)
        .with_special_conditions(self.special_conditions);

        if let Some(hours) = self.duration_hours {
            scenario = scenario.with_duration_hours(hours);
        }
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            scenario = scenario.with_coordinates(lat, lon);
        }
        scenario.validate()?;
        Ok(scenario)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    #[serde(default = "default_forecast_hours")]
    pub hours: u32,
}

fn default_forecast_hours() -> u32 {
    24
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioView {
    pub scenario_id: String,
    pub incident_type: EmergencyType,
    pub severity_level: SeverityLevel,
    pub location: String,
    pub affected_area_radius: f64,
    pub estimated_population_affected: i64,
    pub duration_hours: u32,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&EmergencyScenario> for ScenarioView {
    fn from(s: &EmergencyScenario) -> Self {
        Self {
            scenario_id: s.scenario_id.clone(),
            incident_type: s.incident_type,
            severity_level: s.severity_level,
            location: s.location.clone(),
            affected_area_radius: s.affected_area_radius,
            estimated_population_affected: s.estimated_population_affected,
            duration_hours: s.effective_duration_hours(),
            description: s.description.clone(),
            latitude: s.latitude,
            longitude: s.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceAllocationView {
    pub personnel_deployment: BTreeMap<String, i64>,
    pub equipment_requirements: BTreeMap<String, i64>,
    pub facility_assignments: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneView {
    pub milestone_name: String,
    pub estimated_time: String,
    pub responsible_agency: String,
    pub description: String,
}

impl From<&TimelineMilestone> for MilestoneView {
    fn from(m: &TimelineMilestone) -> Self {
        Self {
            milestone_name: m.milestone_name.clone(),
            estimated_time: m.estimated_time.to_rfc3339(),
            responsible_agency: m.responsible_agency.clone(),
            description: m.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub plan_id: String,
    pub scenario_id: String,
    pub lead_agency: String,
    pub supporting_agencies: Vec<String>,
    pub activation_time: String,
    pub estimated_duration: String,
    pub immediate_actions: Vec<String>,
    pub resource_allocation: ResourceAllocationView,
    pub timeline_milestones: Vec<MilestoneView>,
    pub communication_plan: BTreeMap<String, String>,
}

impl From<&EmergencyResponsePlan> for PlanView {
    fn from(plan: &EmergencyResponsePlan) -> Self {
        let resources = &plan.resource_allocation;
        Self {
            plan_id: plan.plan_id.clone(),
            scenario_id: plan.scenario_id().to_string(),
            lead_agency: plan.lead_agency.clone(),
            supporting_agencies: plan.supporting_agencies.clone(),
            activation_time: plan.activation_time.to_rfc3339(),
            estimated_duration: plan.estimated_duration_display(),
            immediate_actions: plan.immediate_actions.clone(),
            resource_allocation: ResourceAllocationView {
                personnel_deployment: resources.personnel_deployment.clone(),
                equipment_requirements: resources.equipment_requirements.clone(),
                facility_assignments: resources.facility_assignments.clone(),
            },
            timeline_milestones: plan.timeline_milestones.iter().map(MilestoneView::from).collect(),
            communication_plan: plan.communication_plan.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResponse {
    pub success: bool,
    pub scenario: ScenarioView,
    pub response_plan: PlanView,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub success: bool,
    pub assessment: ScenarioAssessment,
}

/// Current conditions without the reading timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherView {
    pub temperature: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub wind_direction: u32,
    pub pressure: f64,
    pub visibility: f64,
    pub conditions: String,
}

impl From<WeatherCondition> for WeatherView {
    fn from(w: WeatherCondition) -> Self {
        Self {
            temperature: w.temperature,
            humidity: w.humidity,
            wind_speed: w.wind_speed,
            wind_direction: w.wind_direction,
            pressure: w.pressure,
            visibility: w.visibility,
            conditions: w.conditions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub weather: WeatherView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub success: bool,
    pub forecast: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertsResponse {
    pub success: bool,
    pub alerts: Vec<WeatherAlert>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub plan: PlanView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanListResponse {
    pub success: bool,
    pub plans: Vec<PlanView>,
}
