//! Eligibility domain - Benefit documents and program eligibility.
//!
//! # Module Organization
//!
//! - `document` - Document types, extracted data, applicant records
//! - `classification` - Keyword classification and confidence
//! - `extraction` - Text field extraction and quality checks
//! - `program` - Program criteria, eligibility and recommendations
//! - `report` - Batch summary

mod classification;
mod document;
mod errors;
mod extraction;
mod program;
mod report;

pub use classification::DocumentClassifier;
pub use document::{
    parse_money, ApplicantRecord, DocumentMetadata, DocumentType, ExtractedData,
    ProcessedDocument, ProcessingStatus, REVIEW_CONFIDENCE_THRESHOLD,
};
pub use errors::EligibilityError;
pub use extraction::{DataExtractor, ExtractionQuality, LOW_CONFIDENCE_THRESHOLD};
pub use program::{
    EligibilityAssessment, EligibilityCalculator, EligibilityCriteria, EligibilityOutcome,
    IncomeAssessment,
};
pub use report::{generate_summary_report, ProcessingErrorItem, ReviewItem, SummaryReport};
