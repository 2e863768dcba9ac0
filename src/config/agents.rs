//! Per-agent configuration sections

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Policy compliance checker configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceConfig {
    /// Rules file (JSON or YAML); the built-in rule set is used when absent
    pub rules_path: Option<PathBuf>,
}

/// Virtual citizen assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CitizenConfig {
    /// Number of prior chat messages sent with each prompt
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Results returned by a service catalog search
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
}

impl CitizenConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_history == 0 || self.max_history > 100 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        if self.max_search_results == 0 || self.max_search_results > 20 {
            return Err(ValidationError::InvalidSearchLimit);
        }
        Ok(())
    }
}

impl Default for CitizenConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            max_search_results: default_max_search_results(),
        }
    }
}

/// Document eligibility agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityConfig {
    /// Serve fixed extraction results instead of reading document text
    #[serde(default = "default_true")]
    pub use_mock_services: bool,

    /// Program assessed when a request names none
    #[serde(default = "default_program")]
    pub default_program: String,
}

impl EligibilityConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.default_program.as_str() {
            "SNAP" | "Medicaid" | "Housing_Assistance" => Ok(()),
            other => Err(ValidationError::UnknownProgram(other.to_string())),
        }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            use_mock_services: true,
            default_program: default_program(),
        }
    }
}

fn default_max_history() -> usize {
    10
}

fn default_max_search_results() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_program() -> String {
    "SNAP".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_defaults() {
        let config = CitizenConfig::default();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.max_search_results, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_citizen_limits_validated() {
        let config = CitizenConfig {
            max_history: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_eligibility_program_validated() {
        assert!(EligibilityConfig::default().validate().is_ok());
        let config = EligibilityConfig {
            default_program: "WIC".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnknownProgram(p)) if p == "WIC"
        ));
    }
}
