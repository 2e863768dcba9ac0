//! Weather observations and their effect on response planning.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::scenario::EmergencyType;
use crate::domain::foundation::Timestamp;

/// A point-in-time weather observation. Temperatures are Fahrenheit,
/// wind speed mph, visibility km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub temperature: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub wind_direction: u32,
    pub pressure: f64,
    pub visibility: f64,
    pub conditions: String,
    pub timestamp: Timestamp,
}

impl WeatherCondition {
    /// Fixed reading served when no weather service is configured.
    pub fn clear_day() -> Self {
        Self {
            temperature: 72.0,
            humidity: 65,
            wind_speed: 8.5,
            wind_direction: 180,
            pressure: 1013.25,
            visibility: 10.0,
            conditions: "Clear".to_string(),
            timestamp: Timestamp::now(),
        }
    }

    /// Placeholder reading used when the weather service failed.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            temperature: 70.0,
            humidity: 60,
            wind_speed: 5.0,
            wind_direction: 90,
            pressure: 1013.0,
            visibility: 10.0,
            conditions: format!("API Error: {}", reason),
            timestamp: Timestamp::now(),
        }
    }
}

/// Longest forecast served: five days, the OpenWeather horizon.
pub const MAX_FORECAST_HOURS: u32 = 120;

/// Synthetic hourly forecast starting now, at most `MAX_FORECAST_HOURS` entries.
pub fn synthetic_forecast(hours: u32) -> Vec<WeatherCondition> {
    let start = Timestamp::now();
    (0..hours.min(MAX_FORECAST_HOURS))
        .filter_map(|i| {
            let f = f64::from(i);
            Some(WeatherCondition {
                temperature: 70.0 + f * 0.5 - 5.0,
                humidity: 60 + i % 20,
                wind_speed: 5.0 + f64::from(i % 10),
                wind_direction: 90 + (i * 10) % 360,
                pressure: 1013.0 + f64::from(i % 10),
                visibility: 10.0,
                conditions: if i % 3 == 0 { "Partly Cloudy" } else { "Clear" }.to_string(),
                timestamp: start.plus_hours(i64::from(i))?,
            })
        })
        .collect()
}

/// A severe weather alert for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub affected_areas: Vec<String>,
}

/// Sustained wind above which a wind warning is raised.
pub const HIGH_WIND_ALERT_MPH: f64 = 35.0;

/// Alerts derived from the current reading.
pub fn alerts_from_conditions(current: &WeatherCondition) -> Vec<WeatherAlert> {
    if current.wind_speed <= HIGH_WIND_ALERT_MPH {
        return Vec::new();
    }
    let start = Timestamp::now();
    vec![WeatherAlert {
        alert_type: "High Wind Warning".to_string(),
        severity: "Moderate".to_string(),
        title: "High Wind Warning in Effect".to_string(),
        description: "Sustained winds of 35+ mph expected".to_string(),
        start_time: start,
        end_time: start.plus(Duration::hours(6)).unwrap_or(start),
        affected_areas: vec!["Emergency Planning Area".to_string()],
    }]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    #[default]
    Low,
    High,
    Severe,
    Catastrophic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EvacuationDifficulty {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "difficult")]
    Difficult,
    #[serde(rename = "very difficult")]
    VeryDifficult,
}

/// How current weather changes the response picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherImpact {
    pub impact_level: ImpactLevel,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub evacuation_difficulty: EvacuationDifficulty,
}

/// Rates weather against the incident type.
///
/// Later checks override the level set by earlier ones, so a hurricane
/// in 80 mph winds ends up catastrophic even though the wind check
/// first marked it high.
pub fn analyze_weather_impact(kind: EmergencyType, weather: &WeatherCondition) -> WeatherImpact {
    let mut impact = WeatherImpact::default();

    if weather.wind_speed > 25.0 {
        impact.impact_level = ImpactLevel::High;
        impact
            .risk_factors
            .push("High winds may down power lines".to_string());
        impact
            .recommendations
            .push("Pre-position utility crews".to_string());
        impact.evacuation_difficulty = EvacuationDifficulty::Difficult;
    }

    if weather.temperature < 32.0 {
        impact.risk_factors.push("Freezing temperatures".to_string());
        impact
            .recommendations
            .push("Activate warming centers".to_string());
    } else if weather.temperature > 85.0 {
        impact.risk_factors.push("High heat conditions".to_string());
        impact
            .recommendations
            .push("Monitor for heat-related emergencies".to_string());
    }

    if weather.visibility < 5.0 {
        impact.impact_level = ImpactLevel::High;
        impact
            .risk_factors
            .push("Low visibility conditions".to_string());
        impact
            .recommendations
            .push("Restrict non-essential travel".to_string());
        impact.evacuation_difficulty = EvacuationDifficulty::VeryDifficult;
    }

    if kind == EmergencyType::Hurricane {
        if weather.wind_speed > 74.0 {
            impact.impact_level = ImpactLevel::Catastrophic;
            impact
                .recommendations
                .push("Immediate shelter in place".to_string());
        } else if weather.wind_speed > 39.0 {
            impact.impact_level = ImpactLevel::Severe;
            impact
                .recommendations
                .push("Complete evacuations".to_string());
        }
    }

    impact
}
