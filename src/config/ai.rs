//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
///
/// Azure OpenAI takes precedence when fully configured; a plain OpenAI key is
/// the fallback. With neither, the agents that need a language model run
/// without one.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Azure OpenAI resource endpoint
    pub azure_openai_endpoint: Option<String>,

    /// Azure OpenAI API key
    pub azure_openai_api_key: Option<String>,

    /// Azure OpenAI deployment name
    pub azure_openai_deployment_name: Option<String>,

    /// Azure OpenAI API version
    #[serde(default = "default_api_version")]
    pub azure_openai_api_version: String,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if all three Azure OpenAI settings are present
    pub fn has_azure(&self) -> bool {
        is_set(&self.azure_openai_endpoint)
            && is_set(&self.azure_openai_api_key)
            && is_set(&self.azure_openai_deployment_name)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        is_set(&self.openai_api_key)
    }

    /// Check if any provider is usable
    pub fn is_configured(&self) -> bool {
        self.has_azure() || self.has_openai()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let azure_parts = [
            is_set(&self.azure_openai_endpoint),
            is_set(&self.azure_openai_api_key),
            is_set(&self.azure_openai_deployment_name),
        ];
        let present = azure_parts.iter().filter(|p| **p).count();
        if present > 0 && present < azure_parts.len() {
            return Err(ValidationError::PartialAzureConfig);
        }

        if let Some(endpoint) = self.azure_openai_endpoint.as_deref().filter(|e| !e.is_empty()) {
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(ValidationError::InvalidUrl("AZURE_OPENAI_ENDPOINT"));
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            azure_openai_endpoint: None,
            azure_openai_api_key: None,
            azure_openai_deployment_name: None,
            azure_openai_api_version: default_api_version(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

fn default_api_version() -> String {
    "2024-06-01".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure() -> AiConfig {
        AiConfig {
            azure_openai_endpoint: Some("https://city.openai.azure.com".to_string()),
            azure_openai_api_key: Some("key".to_string()),
            azure_openai_deployment_name: Some("gpt-4".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.azure_openai_api_version, "2024-06-01");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_retries, 3);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_azure_requires_all_three_settings() {
        assert!(azure().has_azure());

        let partial = AiConfig {
            azure_openai_deployment_name: None,
            ..azure()
        };
        assert!(!partial.has_azure());
        assert!(matches!(partial.validate(), Err(ValidationError::PartialAzureConfig)));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let config = AiConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_openai());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = AiConfig {
            azure_openai_endpoint: Some("city.openai.azure.com".to_string()),
            ..azure()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_configs() {
        assert!(azure().validate().is_ok());
        assert!(AiConfig::default().validate().is_ok());
        let openai = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert!(openai.validate().is_ok());
        assert!(openai.is_configured());
    }
}
