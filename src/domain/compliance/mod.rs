//! Compliance domain - Policy documents, rules and scoring.
//!
//! # Module Organization
//!
//! - `parser` - Text/markdown to [`PolicyDocument`]
//! - `rule` - Rule definitions and rule files
//! - `engine` - Rule evaluation and weighted scoring
//! - `report` - JSON report rendering
//! - `prompts` - AI review prompts and reply parsing

mod document;
mod engine;
mod errors;
mod parser;
pub mod prompts;
mod report;
mod rule;

pub use document::{DocumentMetadata, PolicyDocument, Section};
pub use engine::{ComplianceReport, ComplianceRulesEngine, ComplianceViolation, ViolationSummary};
pub use errors::ComplianceError;
pub use parser::{PolicyDocumentParser, SUPPORTED_FORMATS};
pub use report::{build_report, describe_rule};
pub use rule::{ComplianceLevel, ComplianceRule, RuleSet};
