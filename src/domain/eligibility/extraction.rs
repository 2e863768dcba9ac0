//! Line-based field extraction from document text, plus quality checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::document::{DocumentType, ExtractedData};

/// Fields below this confidence are reported by validation.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

static MONEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([0-9,]+\.[0-9]{2})").expect("money pattern must compile"));

static ADDRESS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+.*[A-Za-z]").expect("address pattern must compile"));

fn amounts(line: &str) -> Vec<String> {
    MONEY
        .captures_iter(line)
        .map(|c| c[1].to_string())
        .collect()
}

fn amount_value(amount: &str) -> f64 {
    amount.replace(',', "").parse().unwrap_or(0.0)
}

fn largest_amount(line: &str) -> Option<String> {
    amounts(line)
        .into_iter()
        .max_by(|a, b| amount_value(a).total_cmp(&amount_value(b)))
}

/// Result of checking an extraction for empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionQuality {
    pub quality_score: f64,
    pub completeness: f64,
    pub issues: Vec<String>,
}

pub struct DataExtractor;

impl DataExtractor {
    /// Extracts the fields known for `document_type`. Types without rules
    /// yield nothing.
    pub fn extract_key_information(
        document_type: DocumentType,
        text: &str,
    ) -> BTreeMap<String, Value> {
        match document_type {
            DocumentType::IncomeVerification => Self::extract_income(text),
            DocumentType::MedicalRecord => Self::extract_medical(text),
            DocumentType::UtilityBill => Self::extract_utility(text),
            DocumentType::IdentityDocument => Self::extract_identity(text),
            _ => BTreeMap::new(),
        }
    }

    fn extract_income(text: &str) -> BTreeMap<String, Value> {
        let mut info = BTreeMap::new();
        for line in text.lines() {
            let lower = line.to_lowercase();
            let trimmed = line.trim();

            if lower.contains("gross pay") {
                if let Some(amount) = largest_amount(line) {
                    info.insert("income_amount".to_string(), Value::from(amount));
                }
            } else if !info.contains_key("income_amount")
                && ["net pay", "salary", "total income"]
                    .iter()
                    .any(|k| lower.contains(k))
            {
                if let Some(amount) = largest_amount(line) {
                    info.insert("income_amount".to_string(), Value::from(amount));
                }
            }

            if lower.contains("employer") || lower.contains("company") {
                info.insert("employer".to_string(), Value::from(trimmed));
            }
            if ["pay period", "frequency", "bi-weekly", "monthly"]
                .iter()
                .any(|k| lower.contains(k))
            {
                info.insert("pay_period".to_string(), Value::from(trimmed));
            }
            if lower.contains("pay date") {
                info.insert("pay_date".to_string(), Value::from(trimmed));
            }
        }
        info
    }

    fn extract_medical(text: &str) -> BTreeMap<String, Value> {
        let mut info = BTreeMap::new();
        for line in text.lines() {
            let lower = line.to_lowercase();
            let key = if lower.contains("patient") && lower.contains("name") {
                "patient_name"
            } else if lower.contains("insurance") {
                "insurance_info"
            } else if lower.contains("date") {
                "visit_date"
            } else {
                continue;
            };
            info.insert(key.to_string(), Value::from(line.trim()));
        }
        info
    }

    fn extract_utility(text: &str) -> BTreeMap<String, Value> {
        let mut info = BTreeMap::new();
        let mut in_address = false;
        for line in text.lines() {
            let lower = line.to_lowercase();
            let trimmed = line.trim();

            if lower.contains("service address") || lower.contains("billing address") {
                in_address = true;
                continue;
            }
            if in_address && !trimmed.is_empty() && ADDRESS_LINE.is_match(trimmed) {
                info.insert("service_address".to_string(), Value::from(trimmed));
                in_address = false;
            }
            if lower.contains("amount due") || lower.contains("total") {
                if let Some(first) = amounts(line).into_iter().next() {
                    info.insert("amount_due".to_string(), Value::from(first));
                }
            }
        }
        info
    }

    fn extract_identity(text: &str) -> BTreeMap<String, Value> {
        let mut info = BTreeMap::new();
        for line in text.lines() {
            let lower = line.to_lowercase();
            let key = if lower.contains("name") {
                "full_name"
            } else if lower.contains("address") {
                "address"
            } else if lower.contains("number") {
                "id_number"
            } else {
                continue;
            };
            info.insert(key.to_string(), Value::from(line.trim()));
        }
        info
    }

    pub fn validate_extraction_quality(fields: &BTreeMap<String, Value>) -> ExtractionQuality {
        if fields.is_empty() {
            return ExtractionQuality {
                quality_score: 0.0,
                completeness: 0.0,
                issues: vec!["No data extracted".to_string()],
            };
        }

        let mut issues = Vec::new();
        let mut valid = 0usize;
        for (key, value) in fields {
            if is_present(value) {
                valid += 1;
            } else {
                issues.push(format!("Empty or invalid value for {}", key));
            }
        }
        let completeness = valid as f64 / fields.len() as f64;
        ExtractionQuality {
            quality_score: completeness,
            completeness,
            issues,
        }
    }

    /// Type-specific completeness rules and low-confidence fields.
    pub fn validate_extracted_data(data: &ExtractedData) -> Vec<String> {
        let has_key = |fragments: &[&str]| {
            data.extracted_fields
                .keys()
                .any(|k| fragments.iter().any(|f| k.contains(f)))
        };

        let mut errors = Vec::new();
        match data.document_type {
            DocumentType::IncomeVerification => {
                if !has_key(&["amount", "total"]) {
                    errors.push("No income amount found in document".to_string());
                }
                if !has_key(&["date"]) {
                    errors.push("No date information found in document".to_string());
                }
            }
            DocumentType::IdentityDocument => {
                if !has_key(&["name"]) {
                    errors.push("No name found in identity document".to_string());
                }
            }
            DocumentType::UtilityBill => {
                if !has_key(&["address"]) {
                    errors.push("No address found in utility bill".to_string());
                }
            }
            _ => {}
        }

        let low: Vec<&str> = data
            .confidence_scores
            .iter()
            .filter(|(_, c)| **c < LOW_CONFIDENCE_THRESHOLD)
            .map(|(k, _)| k.as_str())
            .collect();
        if !low.is_empty() {
            errors.push(format!("Low confidence fields: {}", low.join(", ")));
        }
        errors
    }
}

/// Non-null, non-false, non-zero and not blank once stringified.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAY_STUB: &str = "ACME CORPORATION
Employer: Acme Corporation
Pay Period: 03/01/2024 - 03/31/2024 (Monthly)
Pay Date: 03/31/2024
Net Pay: $1,450.00
Gross Pay: $1,800.00   YTD: $5,400.00
";

    #[test]
    fn income_prefers_gross_pay_and_largest_amount() {
        let f = DataExtractor::extract_key_information(DocumentType::IncomeVerification, PAY_STUB);
        assert_eq!(f["income_amount"], "5,400.00");
        assert_eq!(f["employer"], "Employer: Acme Corporation");
        assert_eq!(f["pay_period"], "Pay Period: 03/01/2024 - 03/31/2024 (Monthly)");
        assert_eq!(f["pay_date"], "Pay Date: 03/31/2024");
    }

    #[test]
    fn net_pay_used_when_no_gross_line() {
        let f = DataExtractor::extract_key_information(
            DocumentType::IncomeVerification,
            "Net Pay: $980.25\nSalary: $1,200.00",
        );
        assert_eq!(f["income_amount"], "980.25");
    }

    #[test]
    fn medical_lines() {
        let f = DataExtractor::extract_key_information(
            DocumentType::MedicalRecord,
            "Patient Name: Jane Smith\nInsurance: Blue Cross\nVisit Date: 2024-03-10",
        );
        assert_eq!(f["patient_name"], "Patient Name: Jane Smith");
        assert_eq!(f["insurance_info"], "Insurance: Blue Cross");
        assert_eq!(f["visit_date"], "Visit Date: 2024-03-10");
    }

    #[test]
    fn utility_address_follows_header() {
        let f = DataExtractor::extract_key_information(
            DocumentType::UtilityBill,
            "City Power\nService Address:\n\n123 Main St, Springfield\nAmount Due: $125.50",
        );
        assert_eq!(f["service_address"], "123 Main St, Springfield");
        assert_eq!(f["amount_due"], "125.50");
    }

    #[test]
    fn identity_lines() {
        let f = DataExtractor::extract_key_information(
            DocumentType::IdentityDocument,
            "Name: John Doe\nAddress: 9 Pine Rd\nLicense Number: D123",
        );
        assert_eq!(f.len(), 3);
        assert_eq!(f["id_number"], "License Number: D123");
    }

    #[test]
    fn unsupported_types_extract_nothing() {
        assert!(
            DataExtractor::extract_key_information(DocumentType::BankStatement, "Balance: $10.00")
                .is_empty()
        );
    }

    #[test]
    fn quality_of_empty_and_partial_extractions() {
        let q = DataExtractor::validate_extraction_quality(&BTreeMap::new());
        assert_eq!(q.quality_score, 0.0);
        assert_eq!(q.issues, vec!["No data extracted"]);

        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), json!("x"));
        fields.insert("b".to_string(), json!("  "));
        fields.insert("c".to_string(), Value::Null);
        fields.insert("d".to_string(), json!(3500.0));
        let q = DataExtractor::validate_extraction_quality(&fields);
        assert_eq!(q.completeness, 0.5);
        assert_eq!(
            q.issues,
            vec!["Empty or invalid value for b", "Empty or invalid value for c"]
        );
    }

    #[test]
    fn validation_rules_per_type() {
        let mut income = ExtractedData::new(DocumentType::IncomeVerification);
        income.add_field("employer", "Acme", 1.0);
        assert_eq!(
            DataExtractor::validate_extracted_data(&income),
            vec![
                "No income amount found in document",
                "No date information found in document"
            ]
        );

        let mut utility = ExtractedData::new(DocumentType::UtilityBill);
        utility.add_field("service_address", "1 A St", 0.5);
        assert_eq!(
            DataExtractor::validate_extracted_data(&utility),
            vec!["Low confidence fields: service_address"]
        );

        let bank = ExtractedData::new(DocumentType::BankStatement);
        assert!(DataExtractor::validate_extracted_data(&bank).is_empty());
    }
}
