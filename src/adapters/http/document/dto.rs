//! Request and response bodies for the document eligibility agent.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicantInfo, DocumentProcessingResult, InboxOutcome};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessDocumentRequest {
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub document_content: String,
    #[serde(default)]
    pub applicant_info: ApplicantInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboxRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub program: Option<String>,
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_batch_size() -> usize {
    5
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessDocumentResponse {
    pub success: bool,
    pub result: DocumentProcessingResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct InboxResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: InboxOutcome,
}
