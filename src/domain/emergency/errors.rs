//! Emergency domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while building or validating a scenario.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("'{0}' is not a valid EmergencyType")]
    UnknownType(String),

    #[error("{0} is not a valid SeverityLevel")]
    InvalidSeverity(i64),

    #[error("Affected area radius must be positive")]
    NonPositiveRadius,

    #[error("Population affected cannot be negative")]
    NegativePopulation,

    #[error("Duration of {0} hours exceeds the one-year maximum")]
    DurationTooLong(u32),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl From<ScenarioError> for DomainError {
    fn from(err: ScenarioError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
