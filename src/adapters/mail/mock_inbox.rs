//! Mock applicant inbox.
//!
//! Serves two fixed application emails. Attachment ids carry a
//! process-wide counter so repeated listings never reuse an id.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::eligibility::{DocumentMetadata, EligibilityError};
use crate::domain::foundation::Timestamp;
use crate::ports::{MailMessage, MailSource};

/// Body returned for every attachment download.
pub const MOCK_ATTACHMENT_CONTENT: &[u8] = b"Mock attachment content for testing";

static ATTACHMENT_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct MockEmail {
    id: &'static str,
    subject: &'static str,
    sender: &'static str,
    attachments: &'static [&'static str],
}

const MOCK_EMAILS: [MockEmail; 2] = [
    MockEmail {
        id: "1",
        subject: "SNAP Application - Income Documentation",
        sender: "applicant@email.com",
        attachments: &["pay_stub_march.pdf", "bank_statement.pdf"],
    },
    MockEmail {
        id: "2",
        subject: "Medicaid Application Documents",
        sender: "patient@email.com",
        attachments: &["insurance_card.jpg", "medical_record.pdf"],
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MockInbox;

impl MockInbox {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailSource for MockInbox {
    async fn list_messages(&self, _user_id: &str) -> Result<Vec<MailMessage>, EligibilityError> {
        let received_at = Timestamp::now().to_rfc3339();
        Ok(MOCK_EMAILS
            .iter()
            .map(|email| MailMessage {
                id: email.id.to_string(),
                subject: email.subject.to_string(),
                sender: Some(email.sender.to_string()),
                received_at: received_at.clone(),
            })
            .collect())
    }

    async fn get_attachments(
        &self,
        _user_id: &str,
        message_id: &str,
    ) -> Result<Vec<DocumentMetadata>, EligibilityError> {
        let Some(email) = MOCK_EMAILS.iter().find(|e| e.id == message_id) else {
            return Ok(Vec::new());
        };

        Ok(email
            .attachments
            .iter()
            .enumerate()
            .map(|(i, file_name)| {
                let counter = ATTACHMENT_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
                let mime_type = if file_name.ends_with(".pdf") {
                    "application/pdf"
                } else {
                    "image/jpeg"
                };
                let mut metadata = DocumentMetadata::new(
                    format!("{}_{}_{}", message_id, i, counter),
                    *file_name,
                    1024 * (i as u64 + 1),
                    mime_type,
                );
                metadata.email_id = Some(message_id.to_string());
                metadata.sender_email = Some(email.sender.to_string());
                metadata
            })
            .collect())
    }

    async fn download_attachment(
        &self,
        _user_id: &str,
        _message_id: &str,
        _attachment_id: &str,
    ) -> Result<Vec<u8>, EligibilityError> {
        Ok(MOCK_ATTACHMENT_CONTENT.to_vec())
    }
}
