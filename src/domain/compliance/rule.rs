//! Compliance rules and rule sets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Severity of a rule and of the violations it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl ComplianceLevel {
    /// Contribution of one violation (or one rule) to the score.
    pub fn weight(&self) -> f64 {
        match self {
            ComplianceLevel::Critical => 10.0,
            ComplianceLevel::High => 5.0,
            ComplianceLevel::Medium => 3.0,
            ComplianceLevel::Low => 1.0,
            ComplianceLevel::Info => 0.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceLevel::Critical => "critical",
            ComplianceLevel::High => "high",
            ComplianceLevel::Medium => "medium",
            ComplianceLevel::Low => "low",
            ComplianceLevel::Info => "info",
        }
    }
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single compliance rule as stored in rule files.
///
/// `rule_type` selects the check: `required_sections`, `prohibited_terms`,
/// `required_terms`, `pattern` or `consistency`. Anything else, including
/// the default `text`, is informational and never produces violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level: ComplianceLevel,
    #[serde(default)]
    pub pattern: String,
    #[serde(rename = "type", default = "default_rule_type")]
    pub rule_type: String,
    #[serde(default)]
    pub required_sections: Vec<String>,
    #[serde(default)]
    pub prohibited_terms: Vec<String>,
    #[serde(default)]
    pub required_terms: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

fn default_rule_type() -> String {
    "text".to_string()
}

impl ComplianceRule {
    /// `metadata.category`, or "general".
    pub fn category(&self) -> &str {
        self.metadata
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or("general")
    }

    /// `metadata.suggestion` when present.
    pub fn suggestion(&self) -> Option<&str> {
        self.metadata.get("suggestion").and_then(Value::as_str)
    }

    /// `metadata.should_match`, true unless explicitly false.
    pub fn should_match(&self) -> bool {
        self.metadata
            .get("should_match")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Term groups from `metadata.inconsistency_patterns[].terms`.
    pub fn inconsistency_groups(&self) -> Vec<Vec<String>> {
        self.metadata
            .get("inconsistency_patterns")
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .map(|g| {
                        g.get("terms")
                            .and_then(Value::as_array)
                            .map(|terms| {
                                terms
                                    .iter()
                                    .filter_map(|t| t.as_str().map(String::from))
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Rule file contents: `{"rules": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<ComplianceRule>,
}

impl RuleSet {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    }

    /// Picks the format from a file name: `.yaml`/`.yml` is YAML, anything
    /// else JSON.
    pub fn from_named_source(name: &str, text: &str) -> Result<Self, String> {
        let lower = name.to_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml(text)
        } else {
            Self::from_json(text)
        }
    }

    /// The rule set compiled into the binary.
    pub fn builtin() -> Result<Self, String> {
        Self::from_json(BUILTIN_RULES)
    }
}

const BUILTIN_RULES: &str = include_str!("../../../rules/default_rules.json");
