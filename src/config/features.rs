//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Start the policy compliance checker
    #[serde(default = "default_true")]
    pub enable_policy_checker: bool,

    /// Start the virtual citizen assistant (also needs an AI provider)
    #[serde(default = "default_true")]
    pub enable_citizen_assistant: bool,

    /// Start the document eligibility agent
    #[serde(default = "default_true")]
    pub enable_document_agent: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Emit JSON log lines instead of the human-readable format
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_policy_checker: true,
            enable_citizen_assistant: true,
            enable_document_agent: true,
            verbose_errors: false,
            json_logs: false,
        }
    }
}

fn default_true() -> bool {
    true
}
