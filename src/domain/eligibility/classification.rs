//! Document type classification by keyword.

use serde_json::Value;
use std::collections::BTreeMap;

use super::document::DocumentType;

type KeywordTable = [(DocumentType, &'static [&'static str])];

const CONTENT_KEYWORDS: &KeywordTable = &[
    (
        DocumentType::IncomeVerification,
        &["pay", "stub", "salary", "wage", "income", "tax", "w2", "1099", "employment"],
    ),
    (
        DocumentType::MedicalRecord,
        &["medical", "health", "insurance", "patient", "doctor", "prescription", "treatment"],
    ),
    (
        DocumentType::UtilityBill,
        &["utility", "electric", "gas", "water", "bill", "energy", "power"],
    ),
    (
        DocumentType::IdentityDocument,
        &["license", "id", "passport", "ssn", "social security", "birth certificate"],
    ),
    (
        DocumentType::BankStatement,
        &["bank", "statement", "account", "balance", "transaction", "deposit"],
    ),
    (
        DocumentType::HousingDocument,
        &["lease", "rent", "mortgage", "housing", "property", "landlord"],
    ),
];

const FILENAME_KEYWORDS: &KeywordTable = &[
    (
        DocumentType::IncomeVerification,
        &["pay", "stub", "salary", "income", "tax", "w2", "1099"],
    ),
    (
        DocumentType::MedicalRecord,
        &["medical", "insurance", "health", "prescription", "doctor"],
    ),
    (
        DocumentType::UtilityBill,
        &["utility", "electric", "gas", "water", "bill"],
    ),
    (
        DocumentType::IdentityDocument,
        &["id", "license", "passport", "ssn", "social"],
    ),
    (
        DocumentType::HousingDocument,
        &["lease", "rent", "mortgage", "housing"],
    ),
    (
        DocumentType::BankStatement,
        &["bank", "statement", "account"],
    ),
];

const BENEFIT_KEYWORDS: &[&str] = &["snap", "food", "assistance", "benefits"];

fn first_match(table: &KeywordTable, haystacks: &[&str]) -> Option<DocumentType> {
    table
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|k| haystacks.iter().any(|h| h.contains(k)))
        })
        .map(|(kind, _)| *kind)
}

pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Classifies from the file name and any extracted text.
    pub fn classify_content(file_name: &str, text: &str) -> DocumentType {
        let name = file_name.to_lowercase();
        let text = text.to_lowercase();
        first_match(CONTENT_KEYWORDS, &[&name, &text]).unwrap_or(DocumentType::Unknown)
    }

    /// Classifies a mail attachment. The file name decides; the message
    /// subject and body only break ties for benefit applications.
    pub fn classify_attachment(file_name: &str, subject: &str, body: &str) -> DocumentType {
        let name = file_name.to_lowercase();
        if let Some(kind) = first_match(FILENAME_KEYWORDS, &[&name]) {
            return kind;
        }

        let email = format!("{} {}", subject, body).to_lowercase();
        if BENEFIT_KEYWORDS.iter().any(|k| email.contains(k)) {
            if email.contains("income") {
                return DocumentType::IncomeVerification;
            }
            if email.contains("medical") {
                return DocumentType::MedicalRecord;
            }
        }
        DocumentType::Unknown
    }

    /// Confidence in a classification given the field names extracted.
    pub fn validate_classification(
        document_type: DocumentType,
        fields: &BTreeMap<String, Value>,
    ) -> f64 {
        let has = |fragments: &[&str]| {
            fields
                .keys()
                .any(|k| fragments.iter().any(|f| k.contains(f)))
        };

        let mut confidence = 0.5;
        match document_type {
            DocumentType::IncomeVerification => {
                if has(&["income", "amount", "salary"]) {
                    confidence += 0.3;
                }
                if has(&["date", "period"]) {
                    confidence += 0.2;
                }
            }
            DocumentType::MedicalRecord => {
                if has(&["patient", "insurance"]) {
                    confidence += 0.3;
                }
                if has(&["date", "visit"]) {
                    confidence += 0.2;
                }
            }
            DocumentType::UtilityBill => {
                if has(&["address"]) {
                    confidence += 0.3;
                }
                if has(&["amount", "bill"]) {
                    confidence += 0.2;
                }
            }
            _ => {}
        }
        f64::min(confidence, 1.0)
    }

    /// Prebuilt form-recognizer model suited to a document type.
    pub fn form_model_for(document_type: DocumentType) -> &'static str {
        match document_type {
            DocumentType::IncomeVerification | DocumentType::UtilityBill => "prebuilt-invoice",
            DocumentType::MedicalRecord => "prebuilt-healthInsuranceCard",
            DocumentType::IdentityDocument => "prebuilt-idDocument",
            DocumentType::TaxReturn => "prebuilt-tax.us.w2",
            _ => "prebuilt-document",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> BTreeMap<String, Value> {
        names.iter().map(|n| (n.to_string(), json!("x"))).collect()
    }

    #[test]
    fn content_keywords_checked_in_order() {
        assert_eq!(
            DocumentClassifier::classify_content("scan.pdf", "Gross Pay: $2,000.00"),
            DocumentType::IncomeVerification
        );
        assert_eq!(
            DocumentClassifier::classify_content("visit.pdf", "Patient seen by Dr. Lee"),
            DocumentType::MedicalRecord
        );
        // "bill" is a utility keyword, checked before bank
        assert_eq!(
            DocumentClassifier::classify_content("bill.pdf", "account balance"),
            DocumentType::UtilityBill
        );
        assert_eq!(
            DocumentClassifier::classify_content("lease.pdf", "monthly rent"),
            DocumentType::HousingDocument
        );
        assert_eq!(
            DocumentClassifier::classify_content("scan.png", "hello"),
            DocumentType::Unknown
        );
    }

    #[test]
    fn attachment_names_decide_first() {
        assert_eq!(
            DocumentClassifier::classify_attachment("pay_stub_march.pdf", "", ""),
            DocumentType::IncomeVerification
        );
        assert_eq!(
            DocumentClassifier::classify_attachment("bank_statement.pdf", "", ""),
            DocumentType::BankStatement
        );
        assert_eq!(
            DocumentClassifier::classify_attachment("insurance_card.jpg", "", ""),
            DocumentType::MedicalRecord
        );
        assert_eq!(
            DocumentClassifier::classify_attachment("lease.pdf", "", ""),
            DocumentType::HousingDocument
        );
    }

    #[test]
    fn subject_breaks_ties_for_benefit_mail() {
        assert_eq!(
            DocumentClassifier::classify_attachment("scan.png", "SNAP income proof", ""),
            DocumentType::IncomeVerification
        );
        assert_eq!(
            DocumentClassifier::classify_attachment("scan.png", "benefits", "medical forms"),
            DocumentType::MedicalRecord
        );
        assert_eq!(
            DocumentClassifier::classify_attachment("scan.png", "income", ""),
            DocumentType::Unknown
        );
    }

    #[test]
    fn classification_confidence_boosts() {
        let income = DocumentType::IncomeVerification;
        assert_eq!(DocumentClassifier::validate_classification(income, &fields(&[])), 0.5);
        let c = DocumentClassifier::validate_classification(
            income,
            &fields(&["income_amount", "pay_period"]),
        );
        assert!((c - 1.0).abs() < 1e-9);

        let utility = DocumentClassifier::validate_classification(
            DocumentType::UtilityBill,
            &fields(&["service_address"]),
        );
        assert!((utility - 0.8).abs() < 1e-9);

        assert_eq!(
            DocumentClassifier::validate_classification(
                DocumentType::BankStatement,
                &fields(&["account_balance"])
            ),
            0.5
        );
    }

    #[test]
    fn form_models() {
        assert_eq!(
            DocumentClassifier::form_model_for(DocumentType::TaxReturn),
            "prebuilt-tax.us.w2"
        );
        assert_eq!(
            DocumentClassifier::form_model_for(DocumentType::HousingDocument),
            "prebuilt-document"
        );
    }
}
