//! Request and response bodies for policy compliance endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzePolicyRequest {
    #[serde(default)]
    pub document_path: Option<String>,
    #[serde(default)]
    pub policy_text: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
}

/// What an analysis request points at.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicySource {
    Path(String),
    Text(String),
}

impl AnalyzePolicyRequest {
    /// The document path wins when both are given. Blank values count as absent.
    pub fn source(&self) -> Option<PolicySource> {
        let present = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();
        present(&self.document_path)
            .map(PolicySource::Path)
            .or_else(|| present(&self.policy_text).map(PolicySource::Text))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparePoliciesRequest {
    #[serde(default)]
    pub document1: String,
    #[serde(default)]
    pub document2: String,
    #[serde(default)]
    pub title1: Option<String>,
    #[serde(default)]
    pub title2: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesResponse {
    pub success: bool,
    pub rules: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    pub success: bool,
    pub comparison: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: Option<&str>, text: Option<&str>) -> AnalyzePolicyRequest {
        AnalyzePolicyRequest {
            document_path: path.map(String::from),
            policy_text: text.map(String::from),
            requirements: None,
        }
    }

    #[test]
    fn path_takes_precedence() {
        assert_eq!(
            request(Some("policy.md"), Some("text")).source(),
            Some(PolicySource::Path("policy.md".into()))
        );
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(
            request(Some("  "), Some("PURPOSE")).source(),
            Some(PolicySource::Text("PURPOSE".into()))
        );
        assert_eq!(request(None, Some("")).source(), None);
    }
}
