//! Document Eligibility Agent.
//!
//! Pulls applicant documents from a mailbox, extracts their fields through
//! the `DocumentAnalyzer` port and assesses benefit-program eligibility from
//! what was extracted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::eligibility::{
    generate_summary_report, parse_money, ApplicantRecord, DataExtractor, DocumentClassifier,
    DocumentMetadata, DocumentType, EligibilityAssessment, EligibilityCalculator, EligibilityError,
    ExtractedData, ExtractionQuality, IncomeAssessment, ProcessedDocument, ProcessingStatus,
    SummaryReport, REVIEW_CONFIDENCE_THRESHOLD,
};
use crate::ports::{is_supported_attachment, DocumentAnalyzer, MailSource};

/// Applicant details that may accompany a document submitted directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantInfo {
    pub program: Option<String>,
    pub household_size: Option<u32>,
    pub monthly_income: Option<f64>,
    pub available_documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramEligibility {
    pub program: String,
    pub eligible: bool,
    pub confidence: f64,
    pub reason: String,
    pub missing_documents: Vec<DocumentType>,
    pub income_assessment: Option<IncomeAssessment>,
    pub recommendations: Vec<String>,
}

/// Result of processing one document submitted as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentProcessingResult {
    pub document_type: DocumentType,
    pub classification_confidence: f64,
    pub extracted_fields: BTreeMap<String, Value>,
    pub quality: ExtractionQuality,
    pub validation_errors: Vec<String>,
    pub status: ProcessingStatus,
    pub requires_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<ProgramEligibility>,
}

/// Documents from one mailbox pass, with their summary.
#[derive(Debug, Clone, Serialize)]
pub struct InboxOutcome {
    pub documents: Vec<ProcessedDocument>,
    pub report: SummaryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<EligibilityAssessment>,
}

pub struct DocumentEligibilityAgent {
    mail: Arc<dyn MailSource>,
    analyzer: Arc<dyn DocumentAnalyzer>,
    calculator: EligibilityCalculator,
    default_program: String,
}

impl DocumentEligibilityAgent {
    pub fn new(
        mail: Arc<dyn MailSource>,
        analyzer: Arc<dyn DocumentAnalyzer>,
        default_program: impl Into<String>,
    ) -> Self {
        Self {
            mail,
            analyzer,
            calculator: EligibilityCalculator::new(),
            default_program: default_program.into(),
        }
    }

    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    pub fn default_program(&self) -> &str {
        &self.default_program
    }

    pub fn calculator(&self) -> &EligibilityCalculator {
        &self.calculator
    }

    /// Runs one document through classification, extraction and quality
    /// checks. Analyzer failures produce a failed document rather than an
    /// error.
    pub async fn process_single_document(
        &self,
        mut metadata: DocumentMetadata,
        content: &[u8],
    ) -> ProcessedDocument {
        tracing::info!("Processing document: {}", metadata.file_name);
        let initial = DocumentClassifier::classify_attachment(&metadata.file_name, "", "");

        let mut data = match self.analyzer.analyze(content, initial).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Error processing document {}: {}", metadata.file_name, e);
                let mut failed = ProcessedDocument::new(
                    metadata,
                    ExtractedData::new(DocumentType::Unknown),
                    ProcessingStatus::Failed,
                );
                failed.review_notes.push(format!("Processing failed: {}", e));
                return failed;
            }
        };

        if data.has_fields() {
            let text = data.get_text("full_text").unwrap_or_default();
            let refined = DocumentClassifier::classify_content(&metadata.file_name, text);
            if refined != DocumentType::Unknown {
                data.document_type = refined;
            }
        }

        let quality = DataExtractor::validate_extraction_quality(&data.extracted_fields);
        let status =
            ProcessingStatus::from_quality(quality.quality_score, !data.validation_errors.is_empty());
        metadata.confidence_score = quality.quality_score;

        let mut document = ProcessedDocument::new(metadata, data, status);
        document.review_notes.extend(quality.issues);
        tracing::info!(
            file_name = %document.metadata.file_name,
            document_type = %document.document_type,
            status = %document.status,
            "document processed"
        );
        document
    }

    /// Processes the supported attachments of the first `batch_size`
    /// messages. Failures on individual attachments are logged and skipped.
    pub async fn process_email_batch(
        &self,
        user_id: &str,
        batch_size: usize,
    ) -> Result<Vec<ProcessedDocument>, EligibilityError> {
        tracing::info!("Processing email batch for user: {}", user_id);
        let messages = self.mail.list_messages(user_id).await?;

        let mut processed = Vec::new();
        for message in messages.iter().take(batch_size) {
            let attachments = match self.mail.get_attachments(user_id, &message.id).await {
                Ok(attachments) => attachments,
                Err(e) => {
                    tracing::error!("Error listing attachments for {}: {}", message.id, e);
                    continue;
                }
            };

            for mut metadata in attachments.into_iter().filter(is_supported_attachment) {
                let kind =
                    DocumentClassifier::classify_attachment(&metadata.file_name, &message.subject, "");
                metadata.processing_notes.push(format!("Classified as: {}", kind));
                metadata.email_id.get_or_insert_with(|| message.id.clone());
                if metadata.sender_email.is_none() {
                    metadata.sender_email = message.sender.clone();
                }

                let content = match self
                    .mail
                    .download_attachment(user_id, &message.id, &metadata.document_id)
                    .await
                {
                    Ok(content) if !content.is_empty() => content,
                    Ok(_) => {
                        tracing::warn!(
                            "Error processing document {}: {}",
                            metadata.document_id,
                            EligibilityError::EmptyAttachment(metadata.document_id.clone())
                        );
                        continue;
                    }
                    Err(e) => {
                        tracing::error!("Error processing document {}: {}", metadata.document_id, e);
                        continue;
                    }
                };
                processed.push(self.process_single_document(metadata, &content).await);
            }
        }

        tracing::info!("Successfully processed {} documents", processed.len());
        Ok(processed)
    }

    /// Assesses eligibility from the applicant's completed documents. The
    /// last readable income document sets the monthly income.
    pub fn assess_eligibility(
        &self,
        applicant: &ApplicantRecord,
        program: Option<&str>,
        household_size: u32,
    ) -> EligibilityAssessment {
        let program = program.unwrap_or(&self.default_program);
        tracing::info!("Assessing {} eligibility for {}", program, applicant.applicant_id);

        let available = applicant.completed_document_types();
        let monthly_income = applicant
            .documents
            .iter()
            .filter(|d| d.status == ProcessingStatus::Completed)
            .filter_map(ProcessedDocument::income_amount)
            .last()
            .unwrap_or(0.0);

        let outcome =
            self.calculator
                .calculate_eligibility(program, monthly_income, household_size, &available);
        let mut assessment = EligibilityAssessment::from_outcome(
            &applicant.applicant_id,
            program,
            &outcome,
            monthly_income,
            household_size,
        );
        if !outcome.reason.is_empty() {
            assessment.add_note(&outcome.reason);
        }
        for recommendation in EligibilityCalculator::generate_recommendations(&outcome) {
            assessment.add_note(recommendation);
        }
        assessment
    }

    pub fn generate_summary_report(&self, documents: &[ProcessedDocument]) -> SummaryReport {
        generate_summary_report(documents)
    }

    /// Mailbox pass plus report, and an assessment when a program is named.
    pub async fn process_inbox(
        &self,
        user_id: &str,
        batch_size: usize,
        program: Option<&str>,
    ) -> Result<InboxOutcome, EligibilityError> {
        let documents = self.process_email_batch(user_id, batch_size).await?;
        let report = self.generate_summary_report(&documents);

        let assessment = program.map(|program| {
            let email = documents
                .iter()
                .find_map(|d| d.metadata.sender_email.clone())
                .unwrap_or_default();
            let mut applicant = ApplicantRecord::new(user_id, "", "", email);
            for document in &documents {
                applicant.add_document(document.clone());
            }
            self.assess_eligibility(&applicant, Some(program), 1)
        });

        Ok(InboxOutcome {
            documents,
            report,
            assessment,
        })
    }

    /// Processes a document submitted as text. A type that is not a known
    /// document type is replaced by content classification.
    pub fn process_document(
        &self,
        document_type: &str,
        content: &str,
        applicant: &ApplicantInfo,
    ) -> Result<DocumentProcessingResult, EligibilityError> {
        if document_type.trim().is_empty() || content.trim().is_empty() {
            return Err(EligibilityError::MissingInput);
        }

        let kind = document_type
            .parse::<DocumentType>()
            .unwrap_or_else(|_| DocumentClassifier::classify_content("", content));

        let mut data = ExtractedData::new(kind);
        for (name, value) in DataExtractor::extract_key_information(kind, content) {
            data.add_field(name, value, 1.0);
        }
        let classification_confidence =
            DocumentClassifier::validate_classification(kind, &data.extracted_fields);
        let quality = DataExtractor::validate_extraction_quality(&data.extracted_fields);
        data.validation_errors = DataExtractor::validate_extracted_data(&data);

        let status =
            ProcessingStatus::from_quality(quality.quality_score, !data.validation_errors.is_empty());
        let requires_review = status == ProcessingStatus::RequiresReview
            || quality.quality_score < REVIEW_CONFIDENCE_THRESHOLD;

        let eligibility = applicant
            .program
            .as_deref()
            .map(|program| self.program_eligibility(program, applicant, kind, &data));

        Ok(DocumentProcessingResult {
            document_type: kind,
            classification_confidence,
            extracted_fields: data.extracted_fields,
            quality,
            validation_errors: data.validation_errors,
            status,
            requires_review,
            eligibility,
        })
    }

    fn program_eligibility(
        &self,
        program: &str,
        applicant: &ApplicantInfo,
        kind: DocumentType,
        data: &ExtractedData,
    ) -> ProgramEligibility {
        let household_size = applicant.household_size.unwrap_or(1);
        let monthly_income = applicant
            .monthly_income
            .or_else(|| data.get_field("income_amount").and_then(parse_money))
            .unwrap_or(0.0);

        let mut available: Vec<DocumentType> = applicant
            .available_documents
            .iter()
            .filter_map(|d| d.parse().ok())
            .collect();
        if !available.contains(&kind) {
            available.push(kind);
        }

        let outcome =
            self.calculator
                .calculate_eligibility(program, monthly_income, household_size, &available);
        ProgramEligibility {
            program: program.to_string(),
            eligible: outcome.eligible,
            confidence: outcome.confidence,
            reason: outcome.reason.clone(),
            recommendations: EligibilityCalculator::generate_recommendations(&outcome),
            missing_documents: outcome.missing_documents,
            income_assessment: outcome.income_assessment,
        }
    }
}
