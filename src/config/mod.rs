//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CIVIC_AGENTS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use civic_agents::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod agents;
mod ai;
mod error;
mod features;
mod server;
mod weather;

pub use agents::{CitizenConfig, ComplianceConfig, EligibilityConfig};
pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};
pub use weather::WeatherConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration with static weather, built-in compliance rules and no AI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (Azure OpenAI / OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Weather service configuration (OpenWeather)
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Policy compliance checker configuration
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Virtual citizen assistant configuration
    #[serde(default)]
    pub citizen: CitizenConfig,

    /// Document eligibility agent configuration
    #[serde(default)]
    pub eligibility: EligibilityConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CIVIC_AGENTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CIVIC_AGENTS__SERVER__PORT=5000` -> `server.port = 5000`
    /// - `CIVIC_AGENTS__AI__AZURE_OPENAI_ENDPOINT=...` -> `ai.azure_openai_endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CIVIC_AGENTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.weather.validate()?;
        self.citizen.validate()?;
        self.eligibility.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CIVIC_AGENTS__SERVER__PORT");
        env::remove_var("CIVIC_AGENTS__SERVER__ENVIRONMENT");
        env::remove_var("CIVIC_AGENTS__AI__AZURE_OPENAI_ENDPOINT");
        env::remove_var("CIVIC_AGENTS__AI__AZURE_OPENAI_API_KEY");
        env::remove_var("CIVIC_AGENTS__AI__AZURE_OPENAI_DEPLOYMENT_NAME");
        env::remove_var("CIVIC_AGENTS__WEATHER__OPENWEATHER_API_KEY");
        env::remove_var("CIVIC_AGENTS__CITIZEN__MAX_HISTORY");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.ai.is_configured());
        assert!(!config.weather.has_api_key());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIVIC_AGENTS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_azure_settings_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIVIC_AGENTS__AI__AZURE_OPENAI_ENDPOINT", "https://city.openai.azure.com");
        env::set_var("CIVIC_AGENTS__AI__AZURE_OPENAI_API_KEY", "azure-key");
        env::set_var("CIVIC_AGENTS__AI__AZURE_OPENAI_DEPLOYMENT_NAME", "gpt-4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_azure());
        assert_eq!(config.ai.azure_openai_deployment_name.as_deref(), Some("gpt-4"));
    }

    #[test]
    fn test_custom_port_and_history() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIVIC_AGENTS__SERVER__PORT", "3000");
        env::set_var("CIVIC_AGENTS__CITIZEN__MAX_HISTORY", "4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.citizen.max_history, 4);
    }
}
