//! Compliance domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplianceError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error reading {path}: {message}")]
    Read { path: String, message: String },

    #[error("Rules file not found: {0}")]
    RulesNotFound(String),

    #[error("Error loading rules from {path}: {message}")]
    RulesLoad { path: String, message: String },

    #[error("No compliance rules loaded. Load a rule set before checking documents.")]
    NoRulesLoaded,

    #[error("AI analysis not available. Configure an AI provider to enable it.")]
    AiUnavailable,

    #[error("Error writing report to {path}: {message}")]
    ReportWrite { path: String, message: String },
}

impl ComplianceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ComplianceError::DocumentNotFound(_) => ErrorCode::DocumentNotFound,
            ComplianceError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            ComplianceError::RulesNotFound(_) => ErrorCode::RulesNotFound,
            ComplianceError::NoRulesLoaded => ErrorCode::NoRulesLoaded,
            ComplianceError::AiUnavailable => ErrorCode::AiUnavailable,
            ComplianceError::Read { .. }
            | ComplianceError::RulesLoad { .. }
            | ComplianceError::ReportWrite { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<ComplianceError> for DomainError {
    fn from(err: ComplianceError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_load_message_names_path() {
        let err = ComplianceError::RulesLoad {
            path: "rules.json".into(),
            message: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error loading rules from rules.json: expected value"
        );
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[test]
    fn missing_document_maps_to_not_found_code() {
        let err: DomainError = ComplianceError::DocumentNotFound("a.md".into()).into();
        assert_eq!(err.code, ErrorCode::DocumentNotFound);
    }
}
