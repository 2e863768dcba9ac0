//! Scenario Analyzer - Severity, population, geography and resource estimates.

use serde::{Deserialize, Serialize};

use super::scenario::{EmergencyScenario, EmergencyType, SeverityLevel};
use super::weather::WeatherImpact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationPotential {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub level: SeverityLevel,
    pub factors: Vec<String>,
    pub escalation_potential: EscalationPotential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationImpact {
    pub directly_affected: i64,
    pub potentially_affected: i64,
    pub vulnerable_populations: i64,
    pub evacuation_zones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalysis {
    pub area_type: String,
    pub infrastructure_density: String,
    pub natural_barriers: Vec<String>,
    pub access_challenges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    pub personnel: i64,
    pub vehicles: i64,
    pub medical_units: i64,
    pub shelters: i64,
    pub communication_units: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEstimates {
    pub immediate_response_hours: u32,
    pub short_term_response_hours: u32,
    pub total_response_hours: u32,
    pub recovery_days: u32,
}

/// Weather section of an assessment: either the impact or why it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherAssessment {
    Impact(WeatherImpact),
    Unavailable { error: String },
}

impl WeatherAssessment {
    /// The impact, when the lookup succeeded.
    pub fn impact(&self) -> Option<&WeatherImpact> {
        match self {
            WeatherAssessment::Impact(impact) => Some(impact),
            WeatherAssessment::Unavailable { .. } => None,
        }
    }
}

/// Full analysis of a scenario, the input to plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssessment {
    pub scenario_type: EmergencyType,
    pub severity_assessment: SeverityAssessment,
    pub population_impact: PopulationImpact,
    pub geographic_analysis: GeographicAnalysis,
    pub escalation_potential: EscalationPotential,
    pub evacuation_zones: Vec<String>,
    pub access_challenges: Vec<String>,
    pub resource_requirements: ResourceRequirements,
    pub timeline_estimates: TimelineEstimates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_impact: Option<WeatherAssessment>,
}

/// Stateless analyzer for emergency scenarios.
pub struct ScenarioAnalyzer;

impl ScenarioAnalyzer {
    /// Runs every analysis over the scenario. Weather is supplied by the
    /// caller since it needs I/O.
    pub fn assess(
        scenario: &EmergencyScenario,
        weather_impact: Option<WeatherAssessment>,
    ) -> ScenarioAssessment {
        let access_challenges = Self::access_challenges(scenario.incident_type);
        ScenarioAssessment {
            scenario_type: scenario.incident_type,
            severity_assessment: Self::severity(scenario),
            population_impact: Self::population_impact(scenario),
            geographic_analysis: Self::geographic_analysis(scenario),
            escalation_potential: Self::escalation_potential(scenario),
            evacuation_zones: Self::evacuation_zones(scenario.incident_type),
            access_challenges,
            resource_requirements: Self::resource_requirements(scenario),
            timeline_estimates: Self::timeline(scenario),
            weather_impact,
        }
    }

    pub fn severity(scenario: &EmergencyScenario) -> SeverityAssessment {
        let mut factors = Vec::new();
        let population = scenario.estimated_population_affected;

        if population > 100_000 {
            factors.push("Large population impact".to_string());
        } else if population > 10_000 {
            factors.push("Moderate population impact".to_string());
        }

        if scenario.affected_area_radius > 10.0 {
            factors.push("Wide geographic area affected".to_string());
        }

        match scenario.incident_type {
            EmergencyType::Hurricane => {
                factors.push("Hurricane - extended duration impact".to_string())
            }
            EmergencyType::PublicHealth => {
                factors.push("Public health - potential exponential spread".to_string())
            }
            _ => {}
        }

        SeverityAssessment {
            level: scenario.severity_level,
            factors,
            escalation_potential: Self::escalation_potential(scenario),
        }
    }

    pub fn escalation_potential(scenario: &EmergencyScenario) -> EscalationPotential {
        match scenario.incident_type {
            EmergencyType::PublicHealth | EmergencyType::Fire => EscalationPotential::High,
            _ if scenario.severity_level >= SeverityLevel::Severe => EscalationPotential::Moderate,
            _ => EscalationPotential::Low,
        }
    }

    pub fn population_impact(scenario: &EmergencyScenario) -> PopulationImpact {
        let population = scenario.estimated_population_affected;
        let zones: &[&str] = match scenario.incident_type {
            EmergencyType::Hurricane => &["Zone A (Coastal)", "Zone B (Low-lying areas)"],
            EmergencyType::Fire => &["Immediate area", "Adjacent neighborhoods"],
            _ => &["Primary zone", "Buffer zone"],
        };
        PopulationImpact {
            directly_affected: population,
            potentially_affected: (population as f64 * 1.5).floor() as i64,
            vulnerable_populations: (population as f64 * 0.15).floor() as i64,
            evacuation_zones: to_strings(zones),
        }
    }

    pub fn evacuation_zones(kind: EmergencyType) -> Vec<String> {
        let zones: &[&str] = match kind {
            EmergencyType::Hurricane => &[
                "Zone A (Coastal)",
                "Zone B (Low-lying areas)",
                "Zone C (High-risk flooding)",
            ],
            EmergencyType::Fire => &[
                "Immediate area",
                "Adjacent neighborhoods",
                "Smoke-affected areas",
            ],
            EmergencyType::InfrastructureFailure => {
                &["Service area affected", "Secondary impact zones"]
            }
            _ => &["Primary impact area", "Secondary impact area"],
        };
        to_strings(zones)
    }

    pub fn access_challenges(kind: EmergencyType) -> Vec<String> {
        let challenges: &[&str] = match kind {
            EmergencyType::Flood => &[
                "Flooded roads",
                "Bridge closures",
                "Underground access limited",
            ],
            EmergencyType::WinterStorm => {
                &["Snow-blocked roads", "Icy conditions", "Limited visibility"]
            }
            EmergencyType::Fire => &["Smoke-filled areas", "Heat zones", "Debris blockages"],
            _ => &[],
        };
        to_strings(challenges)
    }

    pub fn geographic_analysis(scenario: &EmergencyScenario) -> GeographicAnalysis {
        GeographicAnalysis {
            area_type: Self::area_type(&scenario.location).to_string(),
            infrastructure_density: Self::infrastructure_density(&scenario.location).to_string(),
            natural_barriers: Self::natural_barriers(&scenario.location),
            access_challenges: Self::access_challenges(scenario.incident_type),
        }
    }

    pub fn area_type(location: &str) -> &'static str {
        let location = location.to_lowercase();
        if location.contains("manhattan") || location.contains("downtown") {
            "urban_dense"
        } else if location.contains("brooklyn") || location.contains("queens") {
            "urban_moderate"
        } else if location.contains("suburb") {
            "suburban"
        } else {
            "mixed"
        }
    }

    pub fn infrastructure_density(location: &str) -> &'static str {
        let location = location.to_lowercase();
        if location.contains("manhattan") {
            "very_high"
        } else if ["brooklyn", "queens", "bronx"]
            .iter()
            .any(|borough| location.contains(borough))
        {
            "high"
        } else {
            "moderate"
        }
    }

    pub fn natural_barriers(location: &str) -> Vec<String> {
        let location = location.to_lowercase();
        let barriers: &[&str] = if location.contains("manhattan") {
            &["East River", "Hudson River"]
        } else if location.contains("brooklyn") {
            &["East River", "Gowanus Bay"]
        } else if location.contains("queens") {
            &["East River", "Flushing Bay"]
        } else {
            &[]
        };
        to_strings(barriers)
    }

    /// Personnel scale with population and incident type; everything
    /// else derives from personnel or population.
    pub fn resource_requirements(scenario: &EmergencyScenario) -> ResourceRequirements {
        let population = scenario.estimated_population_affected.max(0);
        let base = (population / 1000).max(50);
        let multiplier = match scenario.incident_type {
            EmergencyType::Hurricane => 2.0,
            EmergencyType::PublicHealth => 1.5,
            EmergencyType::Fire => 1.8,
            EmergencyType::InfrastructureFailure => 1.2,
            EmergencyType::Earthquake => 1.5,
            _ => 1.0,
        };
        let personnel = (base as f64 * multiplier).floor() as i64;

        ResourceRequirements {
            personnel,
            vehicles: personnel / 5,
            medical_units: population / 5000,
            shelters: population / 1000,
            communication_units: (personnel / 20).max(5),
        }
    }

    pub fn timeline(scenario: &EmergencyScenario) -> TimelineEstimates {
        let base = scenario.effective_duration_hours();
        TimelineEstimates {
            immediate_response_hours: (base / 12).min(2),
            short_term_response_hours: (base / 2).min(12),
            total_response_hours: base,
            recovery_days: Self::recovery_days(scenario),
        }
    }

    pub fn recovery_days(scenario: &EmergencyScenario) -> u32 {
        let base: u32 = match scenario.incident_type {
            EmergencyType::Hurricane => 30,
            EmergencyType::Fire => 7,
            EmergencyType::Flood => 14,
            EmergencyType::WinterStorm => 3,
            EmergencyType::PublicHealth => 90,
            EmergencyType::InfrastructureFailure => 5,
            _ => 7,
        };
        let severity = scenario.severity_level.value() as f64;
        (f64::from(base) * severity / 3.0).floor() as u32
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
