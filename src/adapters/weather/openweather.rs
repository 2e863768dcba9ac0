//! OpenWeather adapter.
//!
//! Reads `/weather` and `/forecast` from the OpenWeather 2.5 API in
//! imperial units. OpenWeather's free tier has no alert feed, so alerts
//! are derived from the current reading.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::domain::emergency::{alerts_from_conditions, WeatherAlert, WeatherCondition};
use crate::domain::foundation::{title_case, Timestamp};
use crate::ports::{check_coordinates, WeatherError, WeatherProvider};

/// Forecast entries are three hours apart.
const FORECAST_STEP_HOURS: u32 = 3;

pub struct OpenWeatherProvider {
    api_key: Secret<String>,
    base_url: String,
    client: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// `None` when no API key is configured.
    pub fn from_settings(settings: &WeatherConfig) -> Option<Self> {
        let key = settings.openweather_api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(Self::new(key, &settings.base_url, settings.timeout()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        lat: f64,
        lon: f64,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        check_coordinates(lat, lon)?;

        let mut query = vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.expose_secret().clone()),
            ("units", "imperial".to_string()),
        ];
        query.extend(extra.iter().cloned());

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_conditions(&self, lat: f64, lon: f64) -> Result<WeatherCondition, WeatherError> {
        let reading: Reading = self.get("weather", lat, lon, &[]).await?;
        Ok(reading.into_condition(Timestamp::now()))
    }

    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        hours: u32,
    ) -> Result<Vec<WeatherCondition>, WeatherError> {
        let count = hours / FORECAST_STEP_HOURS;
        let forecast: Forecast = self
            .get("forecast", lat, lon, &[("cnt", count.to_string())])
            .await?;
        Ok(forecast.into_conditions(count as usize))
    }

    async fn severe_alerts(&self, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, WeatherError> {
        let current = self.current_conditions(lat, lon).await?;
        Ok(alerts_from_conditions(&current))
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct Reading {
    main: MainBlock,
    wind: WindBlock,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
    /// Meters.
    visibility: Option<f64>,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u32,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    #[serde(default)]
    deg: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    list: Vec<Reading>,
}

impl Reading {
    fn into_condition(self, fallback_time: Timestamp) -> WeatherCondition {
        let conditions = self
            .weather
            .first()
            .map(|w| title_case(&w.description))
            .unwrap_or_else(|| "Unknown".to_string());
        WeatherCondition {
            temperature: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            wind_direction: self.wind.deg,
            pressure: self.main.pressure,
            visibility: self.visibility.unwrap_or(10_000.0) / 1000.0,
            conditions,
            timestamp: self.dt.and_then(Timestamp::from_unix).unwrap_or(fallback_time),
        }
    }
}

impl Forecast {
    fn into_conditions(self, count: usize) -> Vec<WeatherCondition> {
        let now = Timestamp::now();
        self.list
            .into_iter()
            .take(count)
            .map(|reading| reading.into_condition(now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "main": {"temp": 68.5, "humidity": 72, "pressure": 1015},
        "visibility": 8000,
        "wind": {"speed": 12.3, "deg": 240},
        "dt": 1710000000
    }"#;

    #[test]
    fn reading_converts_units_and_titles() {
        let reading: Reading = serde_json::from_str(CURRENT).unwrap();
        let condition = reading.into_condition(Timestamp::now());
        assert_eq!(condition.temperature, 68.5);
        assert_eq!(condition.humidity, 72);
        assert_eq!(condition.wind_direction, 240);
        assert_eq!(condition.visibility, 8.0);
        assert_eq!(condition.conditions, "Scattered Clouds");
        assert_eq!(condition.timestamp, Timestamp::from_unix(1710000000).unwrap());
    }

    #[test]
    fn missing_visibility_defaults_to_ten_km() {
        let reading: Reading = serde_json::from_str(
            r#"{"main": {"temp": 50, "humidity": 40, "pressure": 1000}, "wind": {"speed": 3}}"#,
        )
        .unwrap();
        let condition = reading.into_condition(Timestamp::now());
        assert_eq!(condition.visibility, 10.0);
        assert_eq!(condition.conditions, "Unknown");
    }

    #[test]
    fn forecast_takes_requested_entries() {
        let json = format!(r#"{{"list": [{0}, {0}, {0}]}}"#, CURRENT);
        let forecast: Forecast = serde_json::from_str(&json).unwrap();
        assert_eq!(forecast.into_conditions(2).len(), 2);
    }

    #[test]
    fn from_settings_requires_key() {
        let mut settings = WeatherConfig::default();
        assert!(OpenWeatherProvider::from_settings(&settings).is_none());
        settings.openweather_api_key = Some("abc".to_string());
        let provider = OpenWeatherProvider::from_settings(&settings).unwrap();
        assert_eq!(provider.base_url, "https://api.openweathermap.org/data/2.5");
    }

    #[tokio::test]
    async fn rejects_bad_coordinates_before_request() {
        let provider = OpenWeatherProvider::new("k", "http://127.0.0.1:9", Duration::from_secs(1));
        let err = provider.current_conditions(120.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinates(_)));
    }
}
