//! Compliance report rendering.

use serde_json::{json, Value};

use super::document::PolicyDocument;
use super::engine::ComplianceReport;
use super::rule::ComplianceRule;

/// Builds the report object returned by the API and written to disk.
pub fn build_report(
    document: &PolicyDocument,
    report: &ComplianceReport,
    ai_analysis: Option<&Value>,
) -> Value {
    let violations: Vec<Value> = report
        .violations
        .iter()
        .map(|v| {
            json!({
                "rule_id": v.rule_id,
                "rule_name": v.rule_name,
                "level": v.level,
                "description": v.description,
                "location": v.location,
                "suggestion": v.suggestion,
            })
        })
        .collect();

    let mut out = json!({
        "document_info": {
            "title": document.title,
            "file_path": document.file_path,
            "word_count": document.metadata.word_count,
            "sections": document.sections.len(),
            "checked_at": report.checked_at.to_rfc3339(),
        },
        "compliance_results": {
            "score": report.compliance_score,
            "total_rules_checked": report.total_rules_checked,
            "violations_summary": report.summary,
            "violations": violations,
        }
    });

    if let (Some(ai), Some(obj)) = (ai_analysis, out.as_object_mut()) {
        obj.insert("ai_analysis".to_string(), ai.clone());
    }
    out
}

/// One entry of the rule listing.
pub fn describe_rule(rule: &ComplianceRule) -> Value {
    json!({
        "id": rule.id,
        "name": rule.name,
        "description": rule.description,
        "level": rule.level,
        "type": rule.rule_type,
        "category": rule.category(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::engine::ComplianceRulesEngine;
    use crate::domain::compliance::parser::PolicyDocumentParser;
    use crate::domain::compliance::rule::RuleSet;

    #[test]
    fn report_has_document_and_results_sections() {
        let doc = PolicyDocumentParser::new().parse_text(
            "# Leave Policy\n## Purpose\nExplains leave.",
            "leave.md",
            None,
        );
        let engine = ComplianceRulesEngine::with_rules(RuleSet::builtin().unwrap());
        let report = engine.check_compliance(&doc, None);
        let value = build_report(&doc, &report, None);

        assert_eq!(value["document_info"]["title"], "Leave Policy");
        assert_eq!(value["document_info"]["sections"], 1);
        assert_eq!(
            value["compliance_results"]["total_rules_checked"],
            engine.rules().len()
        );
        assert!(value["compliance_results"]["violations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v["description"] == "Missing required section: scope"));
        assert!(value.get("ai_analysis").is_none());
    }

    #[test]
    fn ai_analysis_is_attached_when_present() {
        let doc = PolicyDocumentParser::new().parse_text("Short", "s.txt", None);
        let report = ComplianceRulesEngine::new().check_compliance(&doc, None);
        let ai = json!({"compliance_score": 80});
        let value = build_report(&doc, &report, Some(&ai));
        assert_eq!(value["ai_analysis"]["compliance_score"], 80);
        assert_eq!(value["compliance_results"]["score"], 100.0);
    }

    #[test]
    fn rule_description_defaults_category() {
        let rule: ComplianceRule = serde_json::from_value(json!({
            "id": "r", "name": "n", "description": "d", "level": "info"
        }))
        .unwrap();
        let v = describe_rule(&rule);
        assert_eq!(v["category"], "general");
        assert_eq!(v["type"], "text");
        assert_eq!(v["level"], "info");
    }
}
