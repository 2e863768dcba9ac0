//! Mail source port.
//!
//! Benefit applicants email their documents. The eligibility agent pulls
//! messages and attachments through this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::eligibility::{DocumentMetadata, EligibilityError};

/// Attachment extensions the eligibility agent will process.
pub const SUPPORTED_ATTACHMENT_EXTENSIONS: [&str; 8] =
    [".pdf", ".docx", ".doc", ".png", ".jpg", ".jpeg", ".tiff", ".txt"];

pub fn is_supported_attachment(metadata: &DocumentMetadata) -> bool {
    SUPPORTED_ATTACHMENT_EXTENSIONS.contains(&metadata.extension().as_str())
}

/// Summary of one mailbox message carrying attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub id: String,
    pub subject: String,
    pub sender: Option<String>,
    pub received_at: String,
}

#[async_trait]
pub trait MailSource: Send + Sync {
    /// Messages with attachments, most recent first.
    async fn list_messages(&self, user_id: &str) -> Result<Vec<MailMessage>, EligibilityError>;

    /// Attachment metadata for one message.
    async fn get_attachments(
        &self,
        user_id: &str,
        message_id: &str,
    ) -> Result<Vec<DocumentMetadata>, EligibilityError>;

    /// Raw attachment bytes.
    async fn download_attachment(
        &self,
        user_id: &str,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Vec<u8>, EligibilityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions() {
        let doc = DocumentMetadata::new("1", "Pay_Stub.PDF", 1, "application/pdf");
        assert!(is_supported_attachment(&doc));
        let doc = DocumentMetadata::new("2", "budget.xlsx", 1, "application/octet-stream");
        assert!(!is_supported_attachment(&doc));
        let doc = DocumentMetadata::new("3", "README", 1, "text/plain");
        assert!(!is_supported_attachment(&doc));
    }
}
