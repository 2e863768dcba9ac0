//! Batch summary report over processed documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::document::{ProcessedDocument, ProcessingStatus};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub document_id: String,
    pub file_name: String,
    pub confidence: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingErrorItem {
    pub document_id: String,
    pub file_name: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_documents: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub average_confidence: f64,
    pub requires_review: Vec<ReviewItem>,
    pub processing_errors: Vec<ProcessingErrorItem>,
    pub timestamp: Timestamp,
}

pub fn generate_summary_report(documents: &[ProcessedDocument]) -> SummaryReport {
    let mut report = SummaryReport {
        total_documents: documents.len(),
        by_status: BTreeMap::new(),
        by_type: BTreeMap::new(),
        average_confidence: 0.0,
        requires_review: Vec::new(),
        processing_errors: Vec::new(),
        timestamp: Timestamp::now(),
    };

    let mut total_confidence = 0.0;
    for doc in documents {
        *report
            .by_status
            .entry(doc.status.as_str().to_string())
            .or_default() += 1;
        *report
            .by_type
            .entry(doc.document_type.as_str().to_string())
            .or_default() += 1;
        total_confidence += doc.metadata.confidence_score;

        if doc.requires_review() {
            report.requires_review.push(ReviewItem {
                document_id: doc.metadata.document_id.clone(),
                file_name: doc.metadata.file_name.clone(),
                confidence: doc.metadata.confidence_score,
                issues: doc.review_notes.clone(),
            });
        }
        if doc.status == ProcessingStatus::Failed {
            report.processing_errors.push(ProcessingErrorItem {
                document_id: doc.metadata.document_id.clone(),
                file_name: doc.metadata.file_name.clone(),
                errors: doc.review_notes.clone(),
            });
        }
    }

    if !documents.is_empty() {
        report.average_confidence = total_confidence / documents.len() as f64;
    }
    report
}
