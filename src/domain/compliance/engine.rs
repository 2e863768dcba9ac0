//! Compliance Rules Engine - Evaluates policy documents against rules.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::document::PolicyDocument;
use super::rule::{ComplianceLevel, ComplianceRule, RuleSet};
use crate::domain::foundation::Timestamp;

/// Characters of context captured on each side of a match.
const CONTEXT_CHARS: usize = 50;

/// A rule failure found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    pub rule_id: String,
    pub rule_name: String,
    pub level: ComplianceLevel,
    pub description: String,
    pub location: String,
    pub context: String,
    pub suggestion: String,
    pub line_number: Option<usize>,
}

/// Violation counts per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl ViolationSummary {
    fn tally(violations: &[ComplianceViolation]) -> Self {
        let mut summary = Self::default();
        for v in violations {
            match v.level {
                ComplianceLevel::Critical => summary.critical += 1,
                ComplianceLevel::High => summary.high += 1,
                ComplianceLevel::Medium => summary.medium += 1,
                ComplianceLevel::Low => summary.low += 1,
                ComplianceLevel::Info => summary.info += 1,
            }
        }
        summary
    }
}

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub document_title: String,
    pub document_path: String,
    pub total_rules_checked: usize,
    pub violations: Vec<ComplianceViolation>,
    /// 0 to 100, weighted by severity.
    pub compliance_score: f64,
    pub checked_at: Timestamp,
    pub summary: ViolationSummary,
}

/// Holds the loaded rules and evaluates documents against them.
#[derive(Debug, Clone, Default)]
pub struct ComplianceRulesEngine {
    rules: Vec<ComplianceRule>,
}

impl ComplianceRulesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rule_set: RuleSet) -> Self {
        Self {
            rules: rule_set.rules,
        }
    }

    /// Replaces every loaded rule.
    pub fn load_rules(&mut self, rule_set: RuleSet) {
        self.rules = rule_set.rules;
    }

    pub fn add_rule(&mut self, rule: ComplianceRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_by_id(&self, rule_id: &str) -> Option<&ComplianceRule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    /// Rules whose `metadata.category` equals `category` exactly.
    pub fn rules_by_category(&self, category: &str) -> Vec<&ComplianceRule> {
        self.rules
            .iter()
            .filter(|r| {
                r.metadata.get("category").and_then(|v| v.as_str()) == Some(category)
            })
            .collect()
    }

    /// Rule ids grouped by category (missing category counts as "general").
    pub fn rule_categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for rule in &self.rules {
            categories
                .entry(rule.category().to_string())
                .or_default()
                .push(rule.id.clone());
        }
        categories
    }

    /// Checks the document against all rules, or only `selected_rules`
    /// when that list is non-empty.
    pub fn check_compliance(
        &self,
        document: &PolicyDocument,
        selected_rules: Option<&[String]>,
    ) -> ComplianceReport {
        let rules: Vec<&ComplianceRule> = match selected_rules {
            Some(ids) if !ids.is_empty() => {
                self.rules.iter().filter(|r| ids.contains(&r.id)).collect()
            }
            _ => self.rules.iter().collect(),
        };

        let violations: Vec<ComplianceViolation> = rules
            .iter()
            .flat_map(|rule| evaluate_rule(document, rule))
            .collect();

        let compliance_score = score(&rules, &violations);

        ComplianceReport {
            document_title: document.title.clone(),
            document_path: document.file_path.clone(),
            total_rules_checked: rules.len(),
            summary: ViolationSummary::tally(&violations),
            violations,
            compliance_score,
            checked_at: Timestamp::now(),
        }
    }
}

fn score(rules: &[&ComplianceRule], violations: &[ComplianceViolation]) -> f64 {
    if rules.is_empty() {
        return 100.0;
    }
    let violated: f64 = violations.iter().map(|v| v.level.weight()).sum();
    let possible: f64 = rules.iter().map(|r| r.level.weight()).sum();
    (100.0 - violated / possible * 100.0).max(0.0)
}

fn evaluate_rule(document: &PolicyDocument, rule: &ComplianceRule) -> Vec<ComplianceViolation> {
    match rule.rule_type.as_str() {
        "required_sections" => check_required_sections(document, rule),
        "prohibited_terms" => check_prohibited_terms(document, rule),
        "required_terms" => check_required_terms(document, rule),
        "pattern" => check_pattern(document, rule),
        "consistency" => check_consistency(document, rule),
        _ => Vec::new(),
    }
}

fn violation(
    rule: &ComplianceRule,
    description: String,
    location: String,
    context: String,
    suggestion: String,
) -> ComplianceViolation {
    ComplianceViolation {
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        level: rule.level,
        description,
        location,
        context,
        suggestion,
        line_number: None,
    }
}

fn check_required_sections(
    document: &PolicyDocument,
    rule: &ComplianceRule,
) -> Vec<ComplianceViolation> {
    let titles: Vec<String> = document
        .section_titles()
        .map(|t| t.to_lowercase())
        .collect();
    let available = document
        .section_titles()
        .take(3)
        .collect::<Vec<_>>()
        .join(", ");

    rule.required_sections
        .iter()
        .filter(|required| {
            let needle = required.to_lowercase();
            !titles.iter().any(|t| t.contains(&needle))
        })
        .map(|required| {
            violation(
                rule,
                format!("Missing required section: {}", required),
                "Document structure".to_string(),
                format!("Available sections: {}...", available),
                format!("Add a section titled '{}' or similar", required),
            )
        })
        .collect()
}

fn check_prohibited_terms(
    document: &PolicyDocument,
    rule: &ComplianceRule,
) -> Vec<ComplianceViolation> {
    let mut violations = Vec::new();
    for term in &rule.prohibited_terms {
        let Ok(re) = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        for m in re.find_iter(&document.content) {
            violations.push(violation(
                rule,
                format!("Prohibited term found: {}", term),
                format!("Position {}", m.start()),
                format!("...{}...", context_around(&document.content, m.start(), m.end())),
                rule.suggestion()
                    .map(String::from)
                    .unwrap_or_else(|| format!("Remove or replace '{}'", term)),
            ));
        }
    }
    violations
}

fn check_required_terms(
    document: &PolicyDocument,
    rule: &ComplianceRule,
) -> Vec<ComplianceViolation> {
    let content = document.content.to_lowercase();
    rule.required_terms
        .iter()
        .filter(|term| !content.contains(&term.to_lowercase()))
        .map(|term| {
            violation(
                rule,
                format!("Required term missing: {}", term),
                "Document content".to_string(),
                "Term not found in document".to_string(),
                format!("Include the term '{}' in appropriate context", term),
            )
        })
        .collect()
}

fn check_pattern(document: &PolicyDocument, rule: &ComplianceRule) -> Vec<ComplianceViolation> {
    let re = match RegexBuilder::new(&rule.pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            return vec![ComplianceViolation {
                level: ComplianceLevel::Info,
                ..violation(
                    rule,
                    format!("Invalid regex pattern: {}", e),
                    "Rule configuration".to_string(),
                    rule.pattern.clone(),
                    "Fix the regex pattern in the rule definition".to_string(),
                )
            }];
        }
    };

    if rule.should_match() {
        if re.is_match(&document.content) {
            return Vec::new();
        }
        return vec![violation(
            rule,
            format!("Required pattern not found: {}", rule.pattern),
            "Document content".to_string(),
            "Pattern not matched".to_string(),
            rule.suggestion()
                .unwrap_or("Add content matching the required pattern")
                .to_string(),
        )];
    }

    re.find_iter(&document.content)
        .map(|m| {
            violation(
                rule,
                format!("Prohibited pattern found: {}", rule.pattern),
                format!("Position {}", m.start()),
                format!("...{}...", context_around(&document.content, m.start(), m.end())),
                rule.suggestion()
                    .unwrap_or("Remove or modify the matching content")
                    .to_string(),
            )
        })
        .collect()
}

fn check_consistency(document: &PolicyDocument, rule: &ComplianceRule) -> Vec<ComplianceViolation> {
    let content = document.content.to_lowercase();
    rule.inconsistency_groups()
        .into_iter()
        .filter(|terms| terms.len() > 1)
        .filter_map(|terms| {
            let found: Vec<&String> = terms
                .iter()
                .filter(|t| content.contains(&t.to_lowercase()))
                .collect();
            if found.len() <= 1 {
                return None;
            }
            let listed = found
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let quoted = found
                .iter()
                .map(|t| format!("'{}'", t))
                .collect::<Vec<_>>()
                .join(", ");
            Some(violation(
                rule,
                format!("Inconsistent terminology: {}", listed),
                "Document content".to_string(),
                format!("Multiple variants found: [{}]", quoted),
                format!("Use consistent terminology. Choose one: {}", terms[0]),
            ))
        })
        .collect()
}

/// Up to 50 characters either side of the byte range, newlines flattened.
fn context_around(content: &str, start: usize, end: usize) -> String {
    let before_start = content[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let after_end = content[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(content.len());
    content[before_start..after_end].replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::parser::PolicyDocumentParser;
    use proptest::prelude::*;
    use serde_json::json;

    fn doc(text: &str) -> PolicyDocument {
        PolicyDocumentParser::new().parse_text(text, "policy.md", None)
    }

    fn rule(value: serde_json::Value) -> ComplianceRule {
        serde_json::from_value(value).unwrap()
    }

    fn engine(rules: Vec<ComplianceRule>) -> ComplianceRulesEngine {
        ComplianceRulesEngine::with_rules(RuleSet { rules })
    }

    #[test]
    fn no_rules_scores_perfect() {
        let report = ComplianceRulesEngine::new().check_compliance(&doc("anything"), None);
        assert_eq!(report.compliance_score, 100.0);
        assert_eq!(report.total_rules_checked, 0);
    }

    #[test]
    fn missing_section_reported_with_available_titles() {
        let e = engine(vec![rule(json!({
            "id": "s", "name": "Sections", "description": "d", "level": "high",
            "type": "required_sections", "required_sections": ["Scope", "Purpose"]
        }))]);
        let report = e.check_compliance(&doc("# Policy\n## Purpose of this policy\nText"), None);
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.description, "Missing required section: Scope");
        assert_eq!(v.location, "Document structure");
        assert_eq!(v.context, "Available sections: Purpose of this policy...");
        assert_eq!(report.summary.high, 1);
        assert_eq!(report.compliance_score, 0.0);
    }

    #[test]
    fn prohibited_term_reports_each_occurrence() {
        let e = engine(vec![rule(json!({
            "id": "p", "name": "Terms", "description": "d", "level": "critical",
            "type": "prohibited_terms", "prohibited_terms": ["Manpower"]
        }))]);
        let report = e.check_compliance(&doc("We need manpower.\nMore MANPOWER now."), None);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].location, "Position 8");
        assert_eq!(report.violations[0].context, "...We need manpower. More MANPOWER now....");
        assert_eq!(report.violations[0].suggestion, "Remove or replace 'Manpower'");
        assert_eq!(report.compliance_score, 0.0);
    }

    #[test]
    fn prohibited_term_uses_metadata_suggestion() {
        let e = engine(vec![rule(json!({
            "id": "p", "name": "Terms", "description": "d", "level": "low",
            "type": "prohibited_terms", "prohibited_terms": ["blacklist"],
            "metadata": {"suggestion": "Say blocklist"}
        }))]);
        let report = e.check_compliance(&doc("the blacklist"), None);
        assert_eq!(report.violations[0].suggestion, "Say blocklist");
    }

    #[test]
    fn required_term_missing() {
        let e = engine(vec![rule(json!({
            "id": "t", "name": "Contact", "description": "d", "level": "medium",
            "type": "required_terms", "required_terms": ["Contact", "policy"]
        }))]);
        let report = e.check_compliance(&doc("This Policy has no phone number."), None);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].description, "Required term missing: Contact");
        assert_eq!(report.violations[0].context, "Term not found in document");
    }

    #[test]
    fn required_pattern_absent() {
        let e = engine(vec![rule(json!({
            "id": "d", "name": "Date", "description": "d", "level": "medium",
            "type": "pattern", "pattern": r"^effective date:"
        }))]);
        let ok = e.check_compliance(&doc("Title\nEFFECTIVE DATE: today"), None);
        assert!(ok.violations.is_empty());
        let bad = e.check_compliance(&doc("Title\nno date"), None);
        assert_eq!(
            bad.violations[0].suggestion,
            "Add content matching the required pattern"
        );
    }

    #[test]
    fn prohibited_pattern_reports_matches() {
        let e = engine(vec![rule(json!({
            "id": "ssn", "name": "SSN", "description": "d", "level": "high",
            "type": "pattern", "pattern": r"\d{3}-\d{2}-\d{4}",
            "metadata": {"should_match": false}
        }))]);
        let report = e.check_compliance(&doc("ssn 123-45-6789 and 987-65-4321"), None);
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations[0]
            .description
            .starts_with("Prohibited pattern found"));
    }

    #[test]
    fn invalid_regex_becomes_info_violation() {
        let e = engine(vec![rule(json!({
            "id": "bad", "name": "Bad", "description": "d", "level": "critical",
            "type": "pattern", "pattern": "(unclosed"
        }))]);
        let report = e.check_compliance(&doc("text"), None);
        let v = &report.violations[0];
        assert_eq!(v.level, ComplianceLevel::Info);
        assert!(v.description.starts_with("Invalid regex pattern:"));
        assert_eq!(v.location, "Rule configuration");
        assert_eq!(v.context, "(unclosed");
        assert_eq!(report.summary.info, 1);
    }

    #[test]
    fn consistency_flags_mixed_terms() {
        let e = engine(vec![rule(json!({
            "id": "c", "name": "Terms", "description": "d", "level": "low",
            "type": "consistency",
            "metadata": {"inconsistency_patterns": [
                {"terms": ["employee", "staff member", "worker"]},
                {"terms": ["manager"]}
            ]}
        }))]);
        let report = e.check_compliance(&doc("Each employee and staff member, and the manager."), None);
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.description, "Inconsistent terminology: employee, staff member");
        assert_eq!(v.context, "Multiple variants found: ['employee', 'staff member']");
        assert_eq!(v.suggestion, "Use consistent terminology. Choose one: employee");
    }

    #[test]
    fn text_rules_never_violate() {
        let e = engine(vec![rule(json!({
            "id": "x", "name": "Info", "description": "d", "level": "critical", "type": "custom"
        }))]);
        let report = e.check_compliance(&doc("anything"), None);
        assert!(report.violations.is_empty());
        assert_eq!(report.compliance_score, 100.0);
    }

    #[test]
    fn selected_rules_filter_by_id() {
        let e = engine(vec![
            rule(json!({"id": "a", "name": "A", "description": "d", "level": "low",
                "type": "required_terms", "required_terms": ["zzz"]})),
            rule(json!({"id": "b", "name": "B", "description": "d", "level": "low",
                "type": "required_terms", "required_terms": ["yyy"]})),
        ]);
        let selected = vec!["b".to_string()];
        let report = e.check_compliance(&doc("text"), Some(&selected));
        assert_eq!(report.total_rules_checked, 1);
        assert_eq!(report.violations[0].rule_id, "b");

        let report = e.check_compliance(&doc("text"), Some(&[]));
        assert_eq!(report.total_rules_checked, 2);
    }

    #[test]
    fn weighted_score_is_partial() {
        let e = engine(vec![
            rule(json!({"id": "a", "name": "A", "description": "d", "level": "high",
                "type": "required_terms", "required_terms": ["missing"]})),
            rule(json!({"id": "b", "name": "B", "description": "d", "level": "high",
                "type": "required_terms", "required_terms": ["text"]})),
        ]);
        let report = e.check_compliance(&doc("text"), None);
        assert!((report.compliance_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_and_categories() {
        let e = ComplianceRulesEngine::with_rules(RuleSet::builtin().unwrap());
        assert!(e.rule_by_id("contact_information").is_some());
        assert!(e.rule_by_id("nope").is_none());
        assert_eq!(e.rules_by_category("legal").len(), 2);
        let categories = e.rule_categories();
        assert!(categories["consistency"].contains(&"terminology_consistency".to_string()));
    }

    #[test]
    fn context_handles_multibyte_text() {
        let text = "é".repeat(60) + "TERM" + &"ü".repeat(60);
        let start = text.find("TERM").unwrap();
        let ctx = context_around(&text, start, start + 4);
        assert_eq!(ctx.chars().count(), 104);
    }

    proptest! {
        #[test]
        fn score_stays_within_bounds(text in "[a-z ]{0,200}", terms in proptest::collection::vec("[a-z]{1,4}", 1..5)) {
            let e = engine(vec![rule(json!({
                "id": "p", "name": "P", "description": "d", "level": "info",
                "type": "prohibited_terms", "prohibited_terms": terms
            }))]);
            let report = e.check_compliance(&doc(&text), None);
            prop_assert!(report.compliance_score >= 0.0);
            prop_assert!(report.compliance_score <= 100.0);
        }
    }
}
