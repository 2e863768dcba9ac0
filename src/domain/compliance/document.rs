//! Parsed policy documents.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A titled block of a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_size: u64,
    pub word_count: usize,
    pub character_count: usize,
    pub line_count: usize,
    pub file_extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_mentioned: Option<Vec<String>>,
}

/// A policy document ready for rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub title: String,
    pub content: String,
    /// Lowercased extension including the dot, e.g. `.md`.
    pub document_type: String,
    pub file_path: String,
    pub metadata: DocumentMetadata,
    pub sections: Vec<Section>,
    pub created_at: Timestamp,
}

impl PolicyDocument {
    pub fn section_titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }
}
