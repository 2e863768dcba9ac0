//! Document analyzer port.
//!
//! Turns raw document bytes into typed fields with confidence scores.

use async_trait::async_trait;

use crate::domain::eligibility::{DocumentType, EligibilityError, ExtractedData};

#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Extract fields from `content`, treating it as `document_type`.
    ///
    /// # Errors
    ///
    /// - `Analysis` when the analyzer cannot read the document
    async fn analyze(
        &self,
        content: &[u8],
        document_type: DocumentType,
    ) -> Result<ExtractedData, EligibilityError>;

    /// Short analyzer name for logs.
    fn name(&self) -> &'static str;
}
