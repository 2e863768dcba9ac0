//! Weather provider port.
//!
//! The emergency coordinator reads current conditions, short forecasts
//! and severe-weather alerts for an incident location through this port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::emergency::{WeatherAlert, WeatherCondition};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for weather lookups by coordinates.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Conditions right now at (`lat`, `lon`).
    async fn current_conditions(&self, lat: f64, lon: f64) -> Result<WeatherCondition, WeatherError>;

    /// Forecast covering the next `hours` hours.
    async fn forecast(&self, lat: f64, lon: f64, hours: u32)
        -> Result<Vec<WeatherCondition>, WeatherError>;

    /// Active severe-weather alerts.
    async fn severe_alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, WeatherError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(String),

    #[error("weather service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("weather response could not be read: {0}")]
    Parse(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

impl WeatherError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WeatherError::InvalidCoordinates(_) => ErrorCode::BadRequest,
            _ => ErrorCode::WeatherServiceError,
        }
    }
}

impl From<WeatherError> for DomainError {
    fn from(err: WeatherError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Rejects latitudes outside ±90 and longitudes outside ±180.
pub fn check_coordinates(lat: f64, lon: f64) -> Result<(), WeatherError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(WeatherError::InvalidCoordinates(format!("latitude {}", lat)));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(WeatherError::InvalidCoordinates(format!("longitude {}", lon)));
    }
    Ok(())
}
