//! Plain-text document analyzer.
//!
//! Decodes the content as UTF-8 and runs the rule-based extractor.

use async_trait::async_trait;

use crate::domain::eligibility::{DataExtractor, DocumentType, EligibilityError, ExtractedData};
use crate::ports::DocumentAnalyzer;

/// Confidence given to rule-extracted fields.
const RULE_FIELD_CONFIDENCE: f64 = 0.8;
const FULL_TEXT_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextDocumentAnalyzer;

impl TextDocumentAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentAnalyzer for TextDocumentAnalyzer {
    async fn analyze(
        &self,
        content: &[u8],
        document_type: DocumentType,
    ) -> Result<ExtractedData, EligibilityError> {
        let text = std::str::from_utf8(content).map_err(|_| EligibilityError::UndecodableContent)?;

        let mut data = ExtractedData::new(document_type);
        for (name, value) in DataExtractor::extract_key_information(document_type, text) {
            data.add_field(name, value, RULE_FIELD_CONFIDENCE);
        }
        data.add_field("full_text", text, FULL_TEXT_CONFIDENCE);
        Ok(data)
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn extracts_income_fields() {
        let text = "Employer: Acme Corp\nGross Pay: $3,500.00\nPay Period: Monthly\n";
        let data = TextDocumentAnalyzer::new()
            .analyze(text.as_bytes(), DocumentType::IncomeVerification)
            .await
            .unwrap();
        assert!(data.get_field("income_amount").is_some());
        assert_eq!(data.confidence_scores["income_amount"], 0.8);
        assert_eq!(data.get_text("full_text"), Some(text));
        assert_eq!(data.confidence_scores["full_text"], 0.9);
    }

    #[tokio::test]
    async fn rejects_binary_content() {
        let err = TextDocumentAnalyzer::new()
            .analyze(&[0xff, 0xfe, 0x00], DocumentType::Unknown)
            .await
            .unwrap_err();
        assert_eq!(err, EligibilityError::UndecodableContent);
    }
}
