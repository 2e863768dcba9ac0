//! Emergency scenario value types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ScenarioError;

/// Kind of incident a scenario describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyType {
    Hurricane,
    Fire,
    Flood,
    WinterStorm,
    PublicHealth,
    InfrastructureFailure,
    Earthquake,
    SecurityIncident,
}

impl EmergencyType {
    pub const ALL: [EmergencyType; 8] = [
        EmergencyType::Hurricane,
        EmergencyType::Fire,
        EmergencyType::Flood,
        EmergencyType::WinterStorm,
        EmergencyType::PublicHealth,
        EmergencyType::InfrastructureFailure,
        EmergencyType::Earthquake,
        EmergencyType::SecurityIncident,
    ];

    /// Wire value used in requests and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::Hurricane => "hurricane",
            EmergencyType::Fire => "fire",
            EmergencyType::Flood => "flood",
            EmergencyType::WinterStorm => "winter_storm",
            EmergencyType::PublicHealth => "public_health",
            EmergencyType::InfrastructureFailure => "infrastructure_failure",
            EmergencyType::Earthquake => "earthquake",
            EmergencyType::SecurityIncident => "security_incident",
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmergencyType {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmergencyType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ScenarioError::UnknownType(s.to_string()))
    }
}

/// Severity scale from 1 (low) to 5 (catastrophic). Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SeverityLevel {
    Low = 1,
    Moderate = 2,
    High = 3,
    Severe = 4,
    Catastrophic = 5,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::Low,
        SeverityLevel::Moderate,
        SeverityLevel::High,
        SeverityLevel::Severe,
        SeverityLevel::Catastrophic,
    ];

    pub fn value(&self) -> i64 {
        *self as i64
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::High => "High",
            SeverityLevel::Severe => "Severe",
            SeverityLevel::Catastrophic => "Catastrophic",
        }
    }
}

impl TryFrom<i64> for SeverityLevel {
    type Error = ScenarioError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        SeverityLevel::ALL
            .iter()
            .copied()
            .find(|s| s.value() == value)
            .ok_or(ScenarioError::InvalidSeverity(value))
    }
}

impl From<SeverityLevel> for i64 {
    fn from(level: SeverityLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Hours assumed when a scenario carries no usable duration.
pub const DEFAULT_DURATION_HOURS: u32 = 24;

/// Longest response a plan covers: one year.
pub const MAX_DURATION_HOURS: u32 = 24 * 366;

/// An emergency to plan a response for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyScenario {
    pub scenario_id: String,
    pub incident_type: EmergencyType,
    pub severity_level: SeverityLevel,
    pub location: String,
    /// Radius in miles.
    pub affected_area_radius: f64,
    pub estimated_population_affected: i64,
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub special_conditions: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl EmergencyScenario {
    /// Builds a scenario and validates it.
    pub fn new(
        scenario_id: impl Into<String>,
        incident_type: EmergencyType,
        severity_level: SeverityLevel,
        location: impl Into<String>,
        affected_area_radius: f64,
        estimated_population_affected: i64,
    ) -> Result<Self, ScenarioError> {
        let scenario = Self {
            scenario_id: scenario_id.into(),
            incident_type,
            severity_level,
            location: location.into(),
            affected_area_radius,
            estimated_population_affected,
            duration_hours: Some(DEFAULT_DURATION_HOURS),
            description: String::new(),
            special_conditions: Vec::new(),
            latitude: None,
            longitude: None,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_special_conditions(mut self, conditions: Vec<String>) -> Self {
        self.special_conditions = conditions;
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Checks the invariants every scenario must hold.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.scenario_id.trim().is_empty() {
            return Err(ScenarioError::MissingField("scenario_id"));
        }
        if self.location.trim().is_empty() {
            return Err(ScenarioError::MissingField("location"));
        }
        if !(self.affected_area_radius > 0.0) {
            return Err(ScenarioError::NonPositiveRadius);
        }
        if self.estimated_population_affected < 0 {
            return Err(ScenarioError::NegativePopulation);
        }
        if let Some(hours) = self.duration_hours.filter(|h| *h > MAX_DURATION_HOURS) {
            return Err(ScenarioError::DurationTooLong(hours));
        }
        Ok(())
    }

    /// Duration used for planning; zero or missing falls back to a day.
    pub fn effective_duration_hours(&self) -> u32 {
        self.duration_hours
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_DURATION_HOURS)
    }

    /// Coordinates, when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
