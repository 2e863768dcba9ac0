//! Policy Compliance Checker.
//!
//! Parses policy documents, evaluates them against the loaded rule set and,
//! when an AI provider is attached, adds model-based review. AI replies that
//! fail are replaced with fallback objects carrying an `error` field, so a
//! provider outage never fails a rule check.

use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::compliance::prompts;
use crate::domain::compliance::{
    build_report, describe_rule, ComplianceError, ComplianceReport, ComplianceRule,
    ComplianceRulesEngine, PolicyDocument, PolicyDocumentParser, RuleSet,
};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

const AGENT: &str = "policy_compliance";
const DEFAULT_REQUIREMENTS: &str = "general best practices";
const DEFAULT_FOCUS: &str = "all";
/// Source name given to policies submitted as raw text.
const INLINE_SOURCE: &str = "policy_text.txt";
const MAX_REPLY_TOKENS: u32 = 2000;
const REVIEW_TEMPERATURE: f32 = 0.3;

pub struct PolicyComplianceChecker {
    engine: RwLock<ComplianceRulesEngine>,
    parser: PolicyDocumentParser,
    ai: Option<Arc<dyn AIProvider>>,
}

impl PolicyComplianceChecker {
    pub fn new(rules: RuleSet, ai: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            engine: RwLock::new(ComplianceRulesEngine::with_rules(rules)),
            parser: PolicyDocumentParser::new(),
            ai,
        }
    }

    /// Checker loaded with the built-in rule set.
    pub fn with_builtin_rules(ai: Option<Arc<dyn AIProvider>>) -> Result<Self, ComplianceError> {
        let rules = RuleSet::builtin().map_err(|message| ComplianceError::RulesLoad {
            path: "<builtin>".to_string(),
            message,
        })?;
        Ok(Self::new(rules, ai))
    }

    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    /// Replaces the loaded rules with those in `path` (JSON, or YAML by
    /// extension). Returns the number of rules loaded.
    pub async fn load_compliance_rules(&self, path: &Path) -> Result<usize, ComplianceError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ComplianceError::RulesNotFound(path.display().to_string()),
            _ => ComplianceError::RulesLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        let rule_set = RuleSet::from_named_source(&path.to_string_lossy(), &text).map_err(
            |message| ComplianceError::RulesLoad {
                path: path.display().to_string(),
                message,
            },
        )?;

        let count = rule_set.rules.len();
        self.engine.write().await.load_rules(rule_set);
        tracing::info!("Loaded {} compliance rules from {}", count, path.display());
        Ok(count)
    }

    pub async fn add_rule(&self, rule: ComplianceRule) {
        self.engine.write().await.add_rule(rule);
    }

    pub async fn rule_by_id(&self, rule_id: &str) -> Option<ComplianceRule> {
        self.engine.read().await.rule_by_id(rule_id).cloned()
    }

    pub async fn rules_by_category(&self, category: &str) -> Vec<ComplianceRule> {
        self.engine
            .read()
            .await
            .rules_by_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Reads and parses a policy file.
    pub async fn parse_document(&self, path: &Path) -> Result<PolicyDocument, ComplianceError> {
        let display = path.display().to_string();
        let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ComplianceError::DocumentNotFound(display.clone()),
            _ => ComplianceError::Read {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;
        PolicyDocumentParser::text_format(path)?;

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ComplianceError::Read {
                path: display.clone(),
                message: e.to_string(),
            })?;
        Ok(self.parser.parse_text(&content, &display, Some(metadata.len())))
    }

    pub fn parse_text(&self, text: &str) -> PolicyDocument {
        self.parser.parse_text(text, INLINE_SOURCE, None)
    }

    pub async fn check_compliance(
        &self,
        document: &PolicyDocument,
        selected_rules: Option<&[String]>,
    ) -> Result<ComplianceReport, ComplianceError> {
        let engine = self.engine.read().await;
        if engine.is_empty() {
            return Err(ComplianceError::NoRulesLoaded);
        }
        Ok(engine.check_compliance(document, selected_rules))
    }

    // ----- AI review -----

    /// Runs `operation`, substituting `fallback(error)` when the provider fails.
    async fn ask_or(
        &self,
        operation: &str,
        prompt: String,
        fallback: fn(&str) -> Value,
    ) -> Result<Value, ComplianceError> {
        let ai = self.ai.as_ref().ok_or(ComplianceError::AiUnavailable)?;
        let request = CompletionRequest::new(RequestMetadata::new(AGENT, operation))
            .with_system_prompt(prompts::SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(MAX_REPLY_TOKENS)
            .with_temperature(REVIEW_TEMPERATURE);
        match ai.complete(request).await {
            Ok(response) => Ok(prompts::parse_ai_json(&response.content)),
            Err(e) => {
                tracing::warn!("AI {} failed: {}", operation, e);
                Ok(fallback(&e.to_string()))
            }
        }
    }

    pub async fn ai_analyze_document(
        &self,
        document: &PolicyDocument,
        requirements: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        let prompt = prompts::analysis_prompt(
            &document.content,
            requirements.unwrap_or(DEFAULT_REQUIREMENTS),
        );
        self.ask_or("analyze_document", prompt, prompts::analysis_fallback)
            .await
    }

    pub async fn ai_suggest_improvements(
        &self,
        document: &PolicyDocument,
        focus_areas: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        let prompt =
            prompts::improvements_prompt(&document.content, focus_areas.unwrap_or(DEFAULT_FOCUS));
        self.ask_or("suggest_improvements", prompt, prompts::improvements_fallback)
            .await
    }

    pub async fn ai_compare_documents(
        &self,
        first: &PolicyDocument,
        second: &PolicyDocument,
    ) -> Result<Value, ComplianceError> {
        let prompt =
            prompts::comparison_prompt(&first.title, &first.content, &second.title, &second.content);
        self.ask_or("compare_documents", prompt, prompts::comparison_fallback)
            .await
    }

    pub async fn generate_policy_recommendations(
        &self,
        policy_type: &str,
        organization_size: &str,
        industry: &str,
        specific_requirements: &str,
    ) -> Result<Value, ComplianceError> {
        let prompt = prompts::recommendations_prompt(
            policy_type,
            organization_size,
            industry,
            specific_requirements,
        );
        self.ask_or("policy_recommendations", prompt, prompts::recommendations_fallback)
            .await
    }

    pub async fn extract_key_terms(&self, document: &PolicyDocument) -> Result<Value, ComplianceError> {
        let prompt = prompts::key_terms_prompt(&document.content);
        self.ask_or("extract_key_terms", prompt, prompts::key_terms_fallback)
            .await
    }

    pub async fn implementation_checklist(
        &self,
        document: &PolicyDocument,
        organization_context: &str,
    ) -> Result<Value, ComplianceError> {
        let prompt =
            prompts::checklist_prompt(&document.title, &document.content, organization_context);
        self.ask_or("implementation_checklist", prompt, prompts::checklist_fallback)
            .await
    }

    // ----- Reports -----

    /// Builds the report object and, when `output_path` is given, writes it
    /// there as pretty JSON.
    pub async fn generate_report(
        &self,
        document: &PolicyDocument,
        report: &ComplianceReport,
        ai_analysis: Option<&Value>,
        output_path: Option<&Path>,
    ) -> Result<Value, ComplianceError> {
        let value = build_report(document, report, ai_analysis);
        if let Some(path) = output_path {
            let write_error = |message: String| ComplianceError::ReportWrite {
                path: path.display().to_string(),
                message,
            };
            let pretty = serde_json::to_string_pretty(&value).map_err(|e| write_error(e.to_string()))?;
            tokio::fs::write(path, pretty)
                .await
                .map_err(|e| write_error(e.to_string()))?;
        }
        Ok(value)
    }

    pub async fn list_available_rules(&self) -> Vec<Value> {
        self.engine.read().await.rules().iter().map(describe_rule).collect()
    }

    pub async fn get_rule_categories(&self) -> BTreeMap<String, Vec<String>> {
        self.engine.read().await.rule_categories()
    }

    // ----- End-to-end -----

    pub async fn analyze_document(
        &self,
        path: &Path,
        requirements: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        let document = self.parse_document(path).await?;
        self.analyze(document, requirements).await
    }

    pub async fn analyze_policy_text(
        &self,
        text: &str,
        requirements: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        self.analyze(self.parse_text(text), requirements).await
    }

    async fn analyze(
        &self,
        document: PolicyDocument,
        requirements: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        let report = self.check_compliance(&document, None).await?;
        tracing::info!(
            title = %document.title,
            score = report.compliance_score,
            violations = report.violations.len(),
            "policy checked"
        );

        let ai_analysis = if self.has_ai() {
            Some(self.ai_analyze_document(&document, requirements).await?)
        } else {
            None
        };
        self.generate_report(&document, &report, ai_analysis.as_ref(), None)
            .await
    }

    /// Compares two policies given as text.
    pub async fn compare_policy_texts(
        &self,
        first: &str,
        first_title: Option<&str>,
        second: &str,
        second_title: Option<&str>,
    ) -> Result<Value, ComplianceError> {
        let mut doc1 = self.parse_text(first);
        let mut doc2 = self.parse_text(second);
        if let Some(title) = first_title {
            doc1.title = title.to_string();
        }
        if let Some(title) = second_title {
            doc2.title = title.to_string();
        }
        self.ai_compare_documents(&doc1, &doc2).await
    }
}
