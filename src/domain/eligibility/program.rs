//! Benefit programs, eligibility calculation and recommendations.

use serde::{Deserialize, Serialize};

use super::document::DocumentType;
use crate::domain::foundation::{title_case, Timestamp};

/// Per-extra-member threshold growth when household size applies.
pub const HOUSEHOLD_FACTOR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    pub program_name: String,
    pub income_threshold: f64,
    pub household_size_factor: bool,
    pub required_documents: Vec<DocumentType>,
}

impl EligibilityCriteria {
    pub fn adjusted_threshold(&self, household_size: u32) -> f64 {
        if self.household_size_factor {
            let extra = household_size.max(1) - 1;
            self.income_threshold * (1.0 + extra as f64 * HOUSEHOLD_FACTOR)
        } else {
            self.income_threshold
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeAssessment {
    pub monthly_income: f64,
    pub threshold: f64,
    pub household_size: u32,
    pub income_eligible: bool,
}

/// Outcome of one eligibility calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub eligible: bool,
    pub reason: String,
    pub confidence: f64,
    pub missing_documents: Vec<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_assessment: Option<IncomeAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub applicant_id: String,
    pub program_name: String,
    pub is_eligible: bool,
    pub confidence_score: f64,
    pub assessed_income: Option<f64>,
    pub household_size: Option<u32>,
    pub missing_documents: Vec<DocumentType>,
    pub assessment_notes: Vec<String>,
    pub assessment_timestamp: Timestamp,
    pub reviewed_by: Option<String>,
}

impl EligibilityAssessment {
    pub fn from_outcome(
        applicant_id: impl Into<String>,
        program_name: impl Into<String>,
        outcome: &EligibilityOutcome,
        assessed_income: f64,
        household_size: u32,
    ) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            program_name: program_name.into(),
            is_eligible: outcome.eligible,
            confidence_score: outcome.confidence,
            assessed_income: Some(assessed_income),
            household_size: Some(household_size),
            missing_documents: outcome.missing_documents.clone(),
            assessment_notes: Vec::new(),
            assessment_timestamp: Timestamp::now(),
            reviewed_by: None,
        }
    }

    pub fn add_note(&mut self, note: impl AsRef<str>) {
        self.assessment_notes
            .push(format!("{}: {}", Timestamp::now().to_rfc3339(), note.as_ref()));
    }
}

#[derive(Debug, Clone)]
pub struct EligibilityCalculator {
    programs: Vec<EligibilityCriteria>,
}

impl Default for EligibilityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl EligibilityCalculator {
    pub fn new() -> Self {
        use DocumentType::*;
        let program = |name: &str, threshold: f64, docs: Vec<DocumentType>| EligibilityCriteria {
            program_name: name.to_string(),
            income_threshold: threshold,
            household_size_factor: true,
            required_documents: docs,
        };
        Self {
            programs: vec![
                program(
                    "SNAP",
                    2000.0,
                    vec![IncomeVerification, IdentityDocument, UtilityBill],
                ),
                program(
                    "Medicaid",
                    1500.0,
                    vec![IncomeVerification, IdentityDocument, MedicalRecord],
                ),
                program(
                    "Housing_Assistance",
                    3000.0,
                    vec![
                        IncomeVerification,
                        IdentityDocument,
                        HousingDocument,
                        UtilityBill,
                    ],
                ),
            ],
        }
    }

    pub fn programs(&self) -> &[EligibilityCriteria] {
        &self.programs
    }

    pub fn criteria(&self, program_name: &str) -> Option<&EligibilityCriteria> {
        self.programs.iter().find(|p| p.program_name == program_name)
    }

    /// Income is checked first; missing documents only decide the reason
    /// when income alone would have qualified.
    pub fn calculate_eligibility(
        &self,
        program_name: &str,
        monthly_income: f64,
        household_size: u32,
        available_documents: &[DocumentType],
    ) -> EligibilityOutcome {
        let Some(criteria) = self.criteria(program_name) else {
            return EligibilityOutcome {
                eligible: false,
                reason: format!("Unknown program: {}", program_name),
                confidence: 0.0,
                missing_documents: Vec::new(),
                income_assessment: None,
            };
        };

        let threshold = criteria.adjusted_threshold(household_size);
        let income_eligible = monthly_income <= threshold;
        let mut outcome = EligibilityOutcome {
            eligible: true,
            reason: String::new(),
            confidence: 1.0,
            missing_documents: Vec::new(),
            income_assessment: Some(IncomeAssessment {
                monthly_income,
                threshold,
                household_size,
                income_eligible,
            }),
        };

        if !income_eligible {
            outcome.eligible = false;
            outcome.reason = format!(
                "Income ${:.2} exceeds threshold ${:.2}",
                monthly_income, threshold
            );
            outcome.confidence = 0.9;
        }

        outcome.missing_documents = criteria
            .required_documents
            .iter()
            .filter(|d| !available_documents.contains(d))
            .copied()
            .collect();

        if !outcome.missing_documents.is_empty() && outcome.eligible {
            let names: Vec<&str> = outcome.missing_documents.iter().map(|d| d.as_str()).collect();
            outcome.eligible = false;
            outcome.reason = format!("Missing required documents: {}", names.join(", "));
            outcome.confidence = 0.8;
        }
        outcome
    }

    pub fn generate_recommendations(outcome: &EligibilityOutcome) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        if outcome.eligible {
            out.push("✅ You appear to be eligible for this program".into());
            out.push("📋 Please submit your application with all required documents".into());
            out.push("⏱️ Processing typically takes 5-10 business days".into());
        } else {
            let reason = outcome.reason.to_lowercase();
            if reason.contains("income") {
                out.push("❌ Current income exceeds program limits".into());
                out.push("💡 Consider applying for other assistance programs".into());
                out.push("📊 Income limits may change annually - check back later".into());
            }
            if reason.contains("missing") {
                out.push("📄 Additional documents required:".into());
                for doc in &outcome.missing_documents {
                    out.push(format!("   • {}", title_case(&doc.as_str().replace('_', " "))));
                }
                out.push("📧 Please email additional documents or visit our office".into());
            }
        }
        out.push("📞 Contact our office if you have questions: (555) 123-4567".into());
        out.push("🌐 Visit our website for more information and resources".into());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use DocumentType::*;

    const SNAP_DOCS: [DocumentType; 3] = [IncomeVerification, IdentityDocument, UtilityBill];

    #[test]
    fn unknown_program() {
        let out = EligibilityCalculator::new().calculate_eligibility("WIC", 0.0, 1, &[]);
        assert!(!out.eligible);
        assert_eq!(out.reason, "Unknown program: WIC");
        assert_eq!(out.confidence, 0.0);
        assert!(out.income_assessment.is_none());
    }

    #[test]
    fn eligible_with_all_documents() {
        let out = EligibilityCalculator::new().calculate_eligibility("SNAP", 1800.0, 1, &SNAP_DOCS);
        assert!(out.eligible);
        assert_eq!(out.confidence, 1.0);
        assert!(out.reason.is_empty());
    }

    #[test]
    fn household_raises_threshold() {
        let calc = EligibilityCalculator::new();
        let out = calc.calculate_eligibility("SNAP", 3500.0, 1, &SNAP_DOCS);
        assert_eq!(out.reason, "Income $3500.00 exceeds threshold $2000.00");
        assert_eq!(out.confidence, 0.9);

        let out = calc.calculate_eligibility("SNAP", 3500.0, 4, &SNAP_DOCS);
        let income = out.income_assessment.unwrap();
        assert!((income.threshold - 3800.0).abs() < 1e-9);
        assert!(out.eligible);
    }

    #[test]
    fn income_reason_wins_over_missing_documents() {
        let out = EligibilityCalculator::new().calculate_eligibility(
            "Medicaid",
            5000.0,
            1,
            &[IncomeVerification],
        );
        assert!(out.reason.starts_with("Income $5000.00"));
        assert_eq!(out.missing_documents, vec![IdentityDocument, MedicalRecord]);
    }

    #[test]
    fn missing_documents_reason() {
        let out = EligibilityCalculator::new().calculate_eligibility(
            "SNAP",
            1000.0,
            1,
            &[IncomeVerification],
        );
        assert_eq!(
            out.reason,
            "Missing required documents: identity_document, utility_bill"
        );
        assert_eq!(out.confidence, 0.8);

        let recs = EligibilityCalculator::generate_recommendations(&out);
        assert_eq!(recs[0], "📄 Additional documents required:");
        assert_eq!(recs[1], "   • Identity Document");
        assert_eq!(recs[2], "   • Utility Bill");
        assert_eq!(recs.last().unwrap(), "🌐 Visit our website for more information and resources");
    }

    #[test]
    fn eligible_recommendations() {
        let out = EligibilityCalculator::new().calculate_eligibility("SNAP", 100.0, 1, &SNAP_DOCS);
        let recs = EligibilityCalculator::generate_recommendations(&out);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0], "✅ You appear to be eligible for this program");
    }

    #[test]
    fn notes_are_timestamped() {
        let out = EligibilityCalculator::new().calculate_eligibility("SNAP", 100.0, 1, &SNAP_DOCS);
        let mut a = EligibilityAssessment::from_outcome("APP_1", "SNAP", &out, 100.0, 1);
        a.add_note("checked");
        assert!(a.assessment_notes[0].ends_with(": checked"));
        assert!(a.assessment_notes[0].len() > "checked".len() + 20);
    }

    proptest! {
        #[test]
        fn threshold_grows_with_household(size in 1u32..12) {
            let calc = EligibilityCalculator::new();
            for criteria in calc.programs() {
                prop_assert!(
                    criteria.adjusted_threshold(size + 1) > criteria.adjusted_threshold(size)
                );
            }
        }

        #[test]
        fn income_eligibility_matches_threshold(income in 0.0f64..10_000.0, size in 1u32..8) {
            let out = EligibilityCalculator::new()
                .calculate_eligibility("Housing_Assistance", income, size, &[]);
            let assessment = out.income_assessment.unwrap();
            prop_assert_eq!(assessment.income_eligible, income <= assessment.threshold);
            prop_assert!(!out.eligible);
        }
    }
}
