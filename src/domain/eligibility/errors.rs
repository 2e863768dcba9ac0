//! Eligibility domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EligibilityError {
    #[error("'{0}' is not a valid DocumentType")]
    UnknownDocumentType(String),

    #[error("Document type and content required")]
    MissingInput,

    #[error("Document content is not valid UTF-8 text")]
    UndecodableContent,

    #[error("Document analysis failed: {0}")]
    Analysis(String),

    #[error("Mail service error: {0}")]
    Mail(String),

    #[error("Attachment {0} has no content")]
    EmptyAttachment(String),
}

impl EligibilityError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EligibilityError::UnknownDocumentType(_) | EligibilityError::MissingInput => {
                ErrorCode::ValidationFailed
            }
            EligibilityError::UndecodableContent => ErrorCode::UnsupportedFormat,
            EligibilityError::Analysis(_) => ErrorCode::DocumentAnalysisError,
            EligibilityError::Mail(_) | EligibilityError::EmptyAttachment(_) => {
                ErrorCode::MailServiceError
            }
        }
    }
}

impl From<EligibilityError> for DomainError {
    fn from(err: EligibilityError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
