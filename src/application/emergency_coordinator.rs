//! Emergency Response Coordinator.
//!
//! Runs a scenario through analysis, plan generation, resource allocation
//! and timeline creation, then stores the plan. Weather lookups go through
//! the `WeatherProvider` port and degrade to placeholder readings when the
//! provider fails.

use std::sync::Arc;

use crate::domain::emergency::{
    alerts_from_conditions, analyze_weather_impact, synthetic_forecast, EmergencyResponsePlan,
    EmergencyScenario, ResponsePlanner, ScenarioAnalyzer, ScenarioAssessment, WeatherAlert,
    WeatherAssessment, WeatherCondition,
};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{PlanRepository, PlanStoreError, WeatherError, WeatherProvider};

pub struct EmergencyCoordinator {
    weather: Arc<dyn WeatherProvider>,
    plans: Arc<dyn PlanRepository>,
}

impl EmergencyCoordinator {
    pub fn new(weather: Arc<dyn WeatherProvider>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { weather, plans }
    }

    pub fn weather_provider_name(&self) -> &'static str {
        self.weather.name()
    }

    /// Analyzes a scenario without generating a plan. Weather impact is
    /// included only when the scenario has coordinates.
    pub async fn assess_scenario(&self, scenario: &EmergencyScenario) -> ScenarioAssessment {
        let weather_impact = match scenario.coordinates() {
            Some((lat, lon)) => Some(match self.weather.current_conditions(lat, lon).await {
                Ok(current) => {
                    WeatherAssessment::Impact(analyze_weather_impact(scenario.incident_type, &current))
                }
                Err(e) => {
                    tracing::warn!("Weather lookup failed for {}: {}", scenario.scenario_id, e);
                    WeatherAssessment::Unavailable {
                        error: e.to_string(),
                    }
                }
            }),
            None => None,
        };
        ScenarioAnalyzer::assess(scenario, weather_impact)
    }

    /// Produces and stores a complete response plan.
    pub async fn coordinate_response(
        &self,
        scenario: &EmergencyScenario,
    ) -> Result<EmergencyResponsePlan, DomainError> {
        scenario.validate()?;
        tracing::info!(
            scenario_id = %scenario.scenario_id,
            incident_type = %scenario.incident_type,
            severity = scenario.severity_level.value(),
            "coordinating emergency response"
        );

        let assessment = self.assess_scenario(scenario).await;
        let mut plan = ResponsePlanner::generate_plan(scenario, &assessment, Timestamp::now());
        ResponsePlanner::allocate_resources(&mut plan, &assessment);
        ResponsePlanner::create_timeline(&mut plan);

        self.plans.save(&plan).await?;
        tracing::info!(
            plan_id = %plan.plan_id,
            lead_agency = %plan.lead_agency,
            personnel = plan.resource_allocation.total_personnel(),
            "response plan created"
        );
        Ok(plan)
    }

    /// Current conditions. Provider failures yield a placeholder reading
    /// whose `conditions` names the error; bad coordinates are rejected.
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherCondition, WeatherError> {
        match self.weather.current_conditions(lat, lon).await {
            Ok(current) => Ok(current),
            Err(e @ WeatherError::InvalidCoordinates(_)) => Err(e),
            Err(e) => {
                tracing::warn!("Weather provider {} failed: {}", self.weather.name(), e);
                Ok(WeatherCondition::unavailable(&e.to_string()))
            }
        }
    }

    /// Forecast for the next `hours`; falls back to a synthetic forecast.
    pub async fn weather_forecast(
        &self,
        lat: f64,
        lon: f64,
        hours: u32,
    ) -> Result<Vec<WeatherCondition>, WeatherError> {
        match self.weather.forecast(lat, lon, hours).await {
            Ok(forecast) => Ok(forecast),
            Err(e @ WeatherError::InvalidCoordinates(_)) => Err(e),
            Err(e) => {
                tracing::warn!("Forecast lookup failed: {}", e);
                Ok(synthetic_forecast(hours))
            }
        }
    }

    /// Severe-weather alerts; derived from the fallback reading on failure.
    pub async fn weather_alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, WeatherError> {
        match self.weather.severe_alerts(lat, lon).await {
            Ok(alerts) => Ok(alerts),
            Err(e @ WeatherError::InvalidCoordinates(_)) => Err(e),
            Err(e) => {
                tracing::warn!("Alert lookup failed: {}", e);
                Ok(alerts_from_conditions(&WeatherCondition::unavailable(&e.to_string())))
            }
        }
    }

    pub async fn get_plan(&self, plan_id: &str) -> Result<EmergencyResponsePlan, DomainError> {
        self.plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| PlanStoreError::NotFound(plan_id.to_string()).into())
    }

    pub async fn list_plans(&self) -> Result<Vec<EmergencyResponsePlan>, DomainError> {
        Ok(self.plans.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryPlanRepository;
    use crate::adapters::weather::StaticWeatherProvider;
    use crate::domain::emergency::{EmergencyType, ImpactLevel, SeverityLevel};
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;

    /// Weather provider that always fails with a server error.
    struct FailingWeather;

    #[async_trait]
    impl WeatherProvider for FailingWeather {
        async fn current_conditions(&self, _: f64, _: f64) -> Result<WeatherCondition, WeatherError> {
            Err(WeatherError::Status {
                status: 500,
                message: "down".into(),
            })
        }

        async fn forecast(&self, _: f64, _: f64, _: u32) -> Result<Vec<WeatherCondition>, WeatherError> {
            Err(WeatherError::Request("timeout".into()))
        }

        async fn severe_alerts(&self, _: f64, _: f64) -> Result<Vec<WeatherAlert>, WeatherError> {
            Err(WeatherError::Request("timeout".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Weather provider reporting hurricane-force winds.
    struct StormWeather;

    #[async_trait]
    impl WeatherProvider for StormWeather {
        async fn current_conditions(&self, _: f64, _: f64) -> Result<WeatherCondition, WeatherError> {
            Ok(WeatherCondition {
                wind_speed: 80.0,
                ..WeatherCondition::clear_day()
            })
        }

        async fn forecast(&self, _: f64, _: f64, hours: u32) -> Result<Vec<WeatherCondition>, WeatherError> {
            Ok(synthetic_forecast(hours))
        }

        async fn severe_alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, WeatherError> {
            let current = self.current_conditions(lat, lon).await?;
            Ok(alerts_from_conditions(&current))
        }

        fn name(&self) -> &'static str {
            "storm"
        }
    }

    fn coordinator(weather: Arc<dyn WeatherProvider>) -> EmergencyCoordinator {
        EmergencyCoordinator::new(weather, Arc::new(InMemoryPlanRepository::new()))
    }

    fn hurricane() -> EmergencyScenario {
        EmergencyScenario::new(
            "scn_test",
            EmergencyType::Hurricane,
            SeverityLevel::Severe,
            "Manhattan, NY",
            15.0,
            250_000,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn coordinate_response_builds_and_stores_plan() {
        let coordinator = coordinator(Arc::new(StaticWeatherProvider::new()));
        let plan = coordinator.coordinate_response(&hurricane()).await.unwrap();

        assert!(plan.plan_id.starts_with("plan_scn_test_"));
        assert_eq!(plan.lead_agency, "Office of Emergency Management");
        assert!(!plan.resource_allocation.personnel_deployment.is_empty());
        assert_eq!(plan.timeline_milestones.len(), 5);

        let stored = coordinator.get_plan(&plan.plan_id).await.unwrap();
        assert_eq!(stored.plan_id, plan.plan_id);
        assert_eq!(coordinator.list_plans().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn weather_only_assessed_with_coordinates() {
        let coordinator = coordinator(Arc::new(StormWeather));
        let without = coordinator.assess_scenario(&hurricane()).await;
        assert!(without.weather_impact.is_none());

        let with = coordinator
            .assess_scenario(&hurricane().with_coordinates(40.78, -73.97))
            .await;
        let impact = with.weather_impact.unwrap();
        assert_eq!(impact.impact().unwrap().impact_level, ImpactLevel::Catastrophic);
    }

    #[tokio::test]
    async fn failed_weather_is_recorded_not_fatal() {
        let coordinator = coordinator(Arc::new(FailingWeather));
        let scenario = hurricane().with_coordinates(40.78, -73.97);
        let assessment = coordinator.assess_scenario(&scenario).await;
        assert!(matches!(
            assessment.weather_impact,
            Some(WeatherAssessment::Unavailable { .. })
        ));
        assert!(coordinator.coordinate_response(&scenario).await.is_ok());
    }

    #[tokio::test]
    async fn weather_falls_back_on_provider_error() {
        let coordinator = coordinator(Arc::new(FailingWeather));
        let current = coordinator.current_weather(40.0, -74.0).await.unwrap();
        assert_eq!(current.temperature, 70.0);
        assert!(current.conditions.starts_with("API Error: "));

        let forecast = coordinator.weather_forecast(40.0, -74.0, 12).await.unwrap();
        assert_eq!(forecast.len(), 12);
        assert!(coordinator.weather_alerts(40.0, -74.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn high_wind_alert() {
        let coordinator = coordinator(Arc::new(StormWeather));
        let alerts = coordinator.weather_alerts(25.7, -80.2).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, "High Wind Warning");
    }

    #[tokio::test]
    async fn bad_coordinates_are_rejected() {
        let coordinator = coordinator(Arc::new(StaticWeatherProvider::new()));
        assert!(coordinator.current_weather(95.0, 0.0).await.is_err());
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let coordinator = coordinator(Arc::new(StaticWeatherProvider::new()));
        let err = coordinator.get_plan("plan_missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanNotFound);
    }
}
