//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Partial Azure OpenAI configuration: endpoint, key and deployment are all required")]
    PartialAzureConfig,

    #[error("Conversation history limit must be between 1 and 100")]
    InvalidHistoryLimit,

    #[error("Search result limit must be between 1 and 20")]
    InvalidSearchLimit,

    #[error("Unknown eligibility program: {0}")]
    UnknownProgram(String),
}
