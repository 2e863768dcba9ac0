//! Eligibility documents, extracted data and applicant records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::errors::EligibilityError;
use crate::domain::foundation::Timestamp;

/// Below this metadata confidence a document is flagged for review.
pub const REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IncomeVerification,
    MedicalRecord,
    UtilityBill,
    IdentityDocument,
    HousingDocument,
    BankStatement,
    TaxReturn,
    EmploymentRecord,
    Unknown,
}

impl DocumentType {
    pub const ALL: [DocumentType; 9] = [
        DocumentType::IncomeVerification,
        DocumentType::MedicalRecord,
        DocumentType::UtilityBill,
        DocumentType::IdentityDocument,
        DocumentType::HousingDocument,
        DocumentType::BankStatement,
        DocumentType::TaxReturn,
        DocumentType::EmploymentRecord,
        DocumentType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::IncomeVerification => "income_verification",
            DocumentType::MedicalRecord => "medical_record",
            DocumentType::UtilityBill => "utility_bill",
            DocumentType::IdentityDocument => "identity_document",
            DocumentType::HousingDocument => "housing_document",
            DocumentType::BankStatement => "bank_statement",
            DocumentType::TaxReturn => "tax_return",
            DocumentType::EmploymentRecord => "employment_record",
            DocumentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EligibilityError::UnknownDocumentType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    RequiresReview,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
            ProcessingStatus::RequiresReview => "requires_review",
        }
    }

    /// Status after extraction: low quality needs a human, otherwise any
    /// validation error fails the document.
    pub fn from_quality(quality_score: f64, has_validation_errors: bool) -> Self {
        if quality_score < 0.6 {
            ProcessingStatus::RequiresReview
        } else if has_validation_errors {
            ProcessingStatus::Failed
        } else {
            ProcessingStatus::Completed
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub document_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    pub upload_timestamp: Timestamp,
    pub email_id: Option<String>,
    pub sender_email: Option<String>,
    pub confidence_score: f64,
    pub processing_notes: Vec<String>,
}

impl DocumentMetadata {
    pub fn new(
        document_id: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            file_name: file_name.into(),
            file_size,
            mime_type: mime_type.into(),
            upload_timestamp: Timestamp::now(),
            email_id: None,
            sender_email: None,
            confidence_score: 0.0,
            processing_notes: Vec::new(),
        }
    }

    /// Lowercased extension including the dot, or empty.
    pub fn extension(&self) -> String {
        self.file_name
            .rfind('.')
            .map(|i| self.file_name[i..].to_lowercase())
            .unwrap_or_default()
    }
}

/// Fields pulled out of a document, each with its own confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub document_type: DocumentType,
    pub extracted_fields: BTreeMap<String, Value>,
    pub confidence_scores: BTreeMap<String, f64>,
    pub validation_errors: Vec<String>,
}

impl ExtractedData {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            extracted_fields: BTreeMap::new(),
            confidence_scores: BTreeMap::new(),
            validation_errors: Vec::new(),
        }
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<Value>, confidence: f64) {
        let name = name.into();
        self.confidence_scores.insert(name.clone(), confidence);
        self.extracted_fields.insert(name, value.into());
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.extracted_fields.get(name)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get_field(name).and_then(Value::as_str)
    }

    pub fn has_fields(&self) -> bool {
        !self.extracted_fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub metadata: DocumentMetadata,
    pub document_type: DocumentType,
    pub extracted_data: ExtractedData,
    pub status: ProcessingStatus,
    pub processing_timestamp: Timestamp,
    pub review_notes: Vec<String>,
}

impl ProcessedDocument {
    pub fn new(
        metadata: DocumentMetadata,
        extracted_data: ExtractedData,
        status: ProcessingStatus,
    ) -> Self {
        Self {
            document_type: extracted_data.document_type,
            metadata,
            extracted_data,
            status,
            processing_timestamp: Timestamp::now(),
            review_notes: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ProcessingStatus::Completed && self.extracted_data.validation_errors.is_empty()
    }

    pub fn requires_review(&self) -> bool {
        self.status == ProcessingStatus::RequiresReview
            || self.metadata.confidence_score < REVIEW_CONFIDENCE_THRESHOLD
    }

    /// Monthly income stated on an income document, if readable.
    pub fn income_amount(&self) -> Option<f64> {
        if self.document_type != DocumentType::IncomeVerification {
            return None;
        }
        self.extracted_data
            .get_field("income_amount")
            .and_then(parse_money)
    }
}

/// Reads `3500`, `3500.0`, `"$3,500.00"` and friends as a plain number.
pub fn parse_money(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(['$', ','], "").trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub applicant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub documents: Vec<ProcessedDocument>,
    pub eligibility_assessments: Vec<super::program::EligibilityAssessment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ApplicantRecord {
    pub fn new(
        applicant_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            applicant_id: applicant_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            address: None,
            documents: Vec::new(),
            eligibility_assessments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_document(&mut self, document: ProcessedDocument) {
        self.documents.push(document);
        self.updated_at = Timestamp::now();
    }

    /// Types of documents that finished processing cleanly.
    pub fn completed_document_types(&self) -> Vec<DocumentType> {
        self.documents
            .iter()
            .filter(|d| d.status == ProcessingStatus::Completed)
            .map(|d| d.document_type)
            .collect()
    }
}
