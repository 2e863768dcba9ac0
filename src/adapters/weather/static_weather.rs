//! Static weather adapter, served when no weather API key is configured.

use async_trait::async_trait;

use crate::domain::emergency::{synthetic_forecast, WeatherAlert, WeatherCondition};
use crate::ports::{check_coordinates, WeatherError, WeatherProvider};

/// Always reports a clear day, a synthetic forecast and no alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWeatherProvider;

impl StaticWeatherProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn current_conditions(&self, lat: f64, lon: f64) -> Result<WeatherCondition, WeatherError> {
        check_coordinates(lat, lon)?;
        Ok(WeatherCondition::clear_day())
    }

    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        hours: u32,
    ) -> Result<Vec<WeatherCondition>, WeatherError> {
        check_coordinates(lat, lon)?;
        Ok(synthetic_forecast(hours))
    }

    async fn severe_alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, WeatherError> {
        check_coordinates(lat, lon)?;
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_clear_day() {
        let provider = StaticWeatherProvider::new();
        let current = provider.current_conditions(40.7, -74.0).await.unwrap();
        assert_eq!(current.temperature, 72.0);
        assert_eq!(current.conditions, "Clear");
        assert_eq!(provider.forecast(40.7, -74.0, 6).await.unwrap().len(), 6);
        assert!(provider.severe_alerts(40.7, -74.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn still_checks_coordinates() {
        let provider = StaticWeatherProvider::new();
        assert!(provider.current_conditions(0.0, 200.0).await.is_err());
    }
}
