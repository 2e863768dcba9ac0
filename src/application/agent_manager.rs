//! Agent Manager.
//!
//! Builds the four civic agents from configuration and hands them to the
//! HTTP layer. The emergency coordinator is always present once
//! initialised; the other agents are optional and stay `None` when disabled
//! or when they could not be built.
//!
//! The manager also runs cross-agent collaborations and keeps a bounded log
//! of them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;

use super::{
    CitizenAssistant, DocumentEligibilityAgent, EmergencyCoordinator, PolicyComplianceChecker,
};
use crate::adapters::ai::{OpenAIConfig, OpenAIProvider};
use crate::adapters::document::{MockDocumentAnalyzer, TextDocumentAnalyzer};
use crate::adapters::mail::MockInbox;
use crate::adapters::storage::InMemoryPlanRepository;
use crate::adapters::weather::{OpenWeatherProvider, StaticWeatherProvider};
use crate::config::AppConfig;
use crate::domain::citizen::{SchedulingDesk, ServiceCatalog};
use crate::domain::compliance::ComplianceError;
use crate::domain::emergency::{
    AgentResponse, EmergencyScenario, EmergencyType, MultiAgentTask, SeverityLevel,
};
use crate::domain::foundation::{DomainError, ErrorCode, TaskId, Timestamp};
use crate::ports::{AIProvider, DocumentAnalyzer, WeatherProvider};

/// Most recent collaborations kept in the task log.
pub const TASK_LOG_LIMIT: usize = 50;

pub const EMERGENCY_POLICY_CHECK: &str = "emergency_policy_check";
const COLLABORATION_SUMMARY: &str =
    "Emergency response plan generated with policy compliance validation";
const COLLABORATION_RADIUS_MILES: f64 = 1.0;

#[derive(Debug, Clone, Error)]
pub enum CollaborationError {
    #[error("Unknown task type: {0}")]
    UnknownTaskType(String),

    #[error("Invalid task data: {0}")]
    InvalidTaskData(String),

    #[error("{}", .0.message)]
    Coordination(DomainError),
}

impl CollaborationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CollaborationError::UnknownTaskType(_) => ErrorCode::UnknownTaskType,
            CollaborationError::InvalidTaskData(_) => ErrorCode::ValidationFailed,
            CollaborationError::Coordination(e) => e.code,
        }
    }
}

impl From<CollaborationError> for DomainError {
    fn from(err: CollaborationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Scenario fields accepted by a collaboration request.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaborationScenario {
    pub incident_type: EmergencyType,
    pub severity_level: SeverityLevel,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_radius")]
    pub affected_area_radius: f64,
    #[serde(default)]
    pub estimated_population_affected: i64,
}

fn default_radius() -> f64 {
    COLLABORATION_RADIUS_MILES
}

#[derive(Debug, Clone, Deserialize)]
struct EmergencyPolicyCheck {
    scenario: CollaborationScenario,
    #[serde(default)]
    policies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyResponseSummary {
    pub plan_id: String,
    pub lead_agency: String,
    pub immediate_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaborationResult {
    pub task_id: TaskId,
    pub emergency_response: Option<EmergencyResponseSummary>,
    pub policy_compliance: Vec<Value>,
    pub collaboration_summary: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentAvailability {
    pub available: bool,
    pub status: &'static str,
}

impl AgentAvailability {
    fn of<T>(agent: &Option<T>) -> Self {
        Self {
            available: agent.is_some(),
            status: if agent.is_some() { "active" } else { "unavailable" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentStatusReport {
    pub emergency_response: AgentAvailability,
    pub policy_compliance: AgentAvailability,
    pub citizen_assistant: AgentAvailability,
    pub document_eligibility: AgentAvailability,
    pub system_status: &'static str,
}

/// Agents handed to `AgentManager::new`.
#[derive(Default)]
pub struct Agents {
    pub coordinator: Option<Arc<EmergencyCoordinator>>,
    pub policy_checker: Option<Arc<PolicyComplianceChecker>>,
    pub citizen_assistant: Option<Arc<CitizenAssistant>>,
    pub document_agent: Option<Arc<DocumentEligibilityAgent>>,
}

pub struct AgentManager {
    agents: Agents,
    initialized: bool,
    tasks: RwLock<VecDeque<MultiAgentTask>>,
}

impl AgentManager {
    /// An initialised manager over already-built agents.
    pub fn new(agents: Agents) -> Self {
        Self {
            agents,
            initialized: true,
            tasks: RwLock::new(VecDeque::new()),
        }
    }

    /// A manager with no agents that reports itself as initialising.
    pub fn uninitialized() -> Self {
        Self {
            agents: Agents::default(),
            initialized: false,
            tasks: RwLock::new(VecDeque::new()),
        }
    }

    /// Builds every agent the configuration allows.
    pub async fn initialize(config: &AppConfig) -> Self {
        let agents = Agents {
            coordinator: Some(Arc::new(build_coordinator(config))),
            policy_checker: build_policy_checker(config).await.map(Arc::new),
            citizen_assistant: build_citizen_assistant(config).map(Arc::new),
            document_agent: build_document_agent(config).map(Arc::new),
        };
        let manager = Self::new(agents);

        let status = manager.status();
        tracing::info!(
            policy_compliance = status.policy_compliance.available,
            citizen_assistant = status.citizen_assistant.available,
            document_eligibility = status.document_eligibility.available,
            "agents initialized"
        );
        manager
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn coordinator(&self) -> Option<Arc<EmergencyCoordinator>> {
        self.agents.coordinator.clone()
    }

    pub fn policy_checker(&self) -> Option<Arc<PolicyComplianceChecker>> {
        self.agents.policy_checker.clone()
    }

    pub fn citizen_assistant(&self) -> Option<Arc<CitizenAssistant>> {
        self.agents.citizen_assistant.clone()
    }

    pub fn document_agent(&self) -> Option<Arc<DocumentEligibilityAgent>> {
        self.agents.document_agent.clone()
    }

    pub fn status(&self) -> AgentStatusReport {
        AgentStatusReport {
            emergency_response: AgentAvailability::of(&self.agents.coordinator),
            policy_compliance: AgentAvailability::of(&self.agents.policy_checker),
            citizen_assistant: AgentAvailability::of(&self.agents.citizen_assistant),
            document_eligibility: AgentAvailability::of(&self.agents.document_agent),
            system_status: if self.initialized {
                "operational"
            } else {
                "initializing"
            },
        }
    }

    /// Recorded collaborations, newest first.
    pub async fn recent_tasks(&self) -> Vec<MultiAgentTask> {
        self.tasks.read().await.iter().cloned().collect()
    }

    async fn record_task(&self, task: MultiAgentTask) {
        let mut tasks = self.tasks.write().await;
        tasks.push_front(task);
        tasks.truncate(TASK_LOG_LIMIT);
    }

    /// Runs a cross-agent task. The emergency plan and the policy checks
    /// run concurrently; either half is skipped when its agent is absent.
    pub async fn collaborate(
        &self,
        task_type: &str,
        task_data: Value,
    ) -> Result<CollaborationResult, CollaborationError> {
        if task_type != EMERGENCY_POLICY_CHECK {
            return Err(CollaborationError::UnknownTaskType(task_type.to_string()));
        }
        let request: EmergencyPolicyCheck = serde_json::from_value(task_data)
            .map_err(|e| CollaborationError::InvalidTaskData(e.to_string()))?;

        let now = Timestamp::now();
        let scenario = EmergencyScenario::new(
            format!("scenario_{}", now.compact()),
            request.scenario.incident_type,
            request.scenario.severity_level,
            request.scenario.location,
            request.scenario.affected_area_radius,
            request.scenario.estimated_population_affected,
        )
        .map_err(|e| CollaborationError::InvalidTaskData(e.to_string()))?
        .with_description(request.scenario.description);

        let mut task = MultiAgentTask::new(
            EMERGENCY_POLICY_CHECK,
            format!("{} response with policy review", scenario.incident_type),
        );
        if self.agents.coordinator.is_some() {
            task.assign("emergency_response");
        }
        if self.agents.policy_checker.is_some() && !request.policies.is_empty() {
            task.assign("policy_compliance");
        }
        task.start();

        let emergency = async {
            let Some(coordinator) = &self.agents.coordinator else {
                return Ok(None);
            };
            let started = Instant::now();
            let plan = coordinator.coordinate_response(&scenario).await?;
            Ok::<_, DomainError>(Some((plan, started.elapsed().as_millis() as u64)))
        };
        let policies = async {
            match &self.agents.policy_checker {
                Some(checker) if !request.policies.is_empty() => {
                    let started = Instant::now();
                    let checks = request
                        .policies
                        .iter()
                        .map(|text| checker.analyze_policy_text(text, None));
                    let results = futures::future::join_all(checks).await;
                    Some((results, started.elapsed().as_millis() as u64))
                }
                _ => None,
            }
        };
        let (emergency, policies) = tokio::join!(emergency, policies);

        let emergency_response = match emergency {
            Ok(Some((plan, elapsed_ms))) => {
                let summary = EmergencyResponseSummary {
                    plan_id: plan.plan_id.clone(),
                    lead_agency: plan.lead_agency.clone(),
                    immediate_actions: plan.immediate_actions.clone(),
                };
                task.record(agent_response(
                    "emergency_response",
                    "coordinator",
                    json!(summary),
                    elapsed_ms,
                ));
                Some(summary)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Collaboration {} failed: {}", task.task_id, e);
                task.fail();
                self.record_task(task).await;
                return Err(CollaborationError::Coordination(e));
            }
        };

        let policy_compliance: Vec<Value> = match policies {
            Some((results, elapsed_ms)) => {
                let analyses: Vec<Value> = results.into_iter().map(analysis_or_error).collect();
                task.record(agent_response(
                    "policy_compliance",
                    "compliance_checker",
                    json!(analyses.len()),
                    elapsed_ms,
                ));
                analyses
            }
            None => Vec::new(),
        };

        task.complete();
        let task_id = task.task_id;
        tracing::info!(
            task_id = %task_id,
            policies = policy_compliance.len(),
            "collaboration completed"
        );
        self.record_task(task).await;

        Ok(CollaborationResult {
            task_id,
            emergency_response,
            policy_compliance,
            collaboration_summary: COLLABORATION_SUMMARY,
        })
    }
}

fn agent_response(agent_id: &str, agent_type: &str, data: Value, elapsed_ms: u64) -> AgentResponse {
    AgentResponse {
        agent_id: agent_id.to_string(),
        agent_type: agent_type.to_string(),
        response_data: data,
        confidence: 1.0,
        timestamp: Timestamp::now(),
        processing_time_ms: elapsed_ms,
    }
}

fn analysis_or_error(result: Result<Value, ComplianceError>) -> Value {
    result.unwrap_or_else(|e| {
        tracing::warn!("Policy check failed during collaboration: {}", e);
        json!({ "error": e.to_string() })
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Agent construction
// ════════════════════════════════════════════════════════════════════════════════

fn build_coordinator(config: &AppConfig) -> EmergencyCoordinator {
    let weather: Arc<dyn WeatherProvider> = match OpenWeatherProvider::from_settings(&config.weather) {
        Some(provider) => Arc::new(provider),
        None => {
            tracing::info!("No OpenWeather key configured, using static weather");
            Arc::new(StaticWeatherProvider::new())
        }
    };
    EmergencyCoordinator::new(weather, Arc::new(InMemoryPlanRepository::new()))
}

fn ai_provider(config: &AppConfig) -> Option<Arc<dyn AIProvider>> {
    OpenAIConfig::from_settings(&config.ai)
        .map(|settings| Arc::new(OpenAIProvider::new(settings)) as Arc<dyn AIProvider>)
}

async fn build_policy_checker(config: &AppConfig) -> Option<PolicyComplianceChecker> {
    if !config.features.enable_policy_checker {
        return None;
    }
    let ai = if config.ai.has_azure() {
        ai_provider(config)
    } else {
        None
    };

    let checker = match &config.compliance.rules_path {
        Some(path) => {
            let checker = PolicyComplianceChecker::new(Default::default(), ai);
            checker.load_compliance_rules(path).await.map(|_| checker)
        }
        None => PolicyComplianceChecker::with_builtin_rules(ai),
    };
    checker
        .map_err(|e| tracing::warn!("Policy Compliance Checker unavailable: {}", e))
        .ok()
}

fn build_citizen_assistant(config: &AppConfig) -> Option<CitizenAssistant> {
    if !config.features.enable_citizen_assistant {
        return None;
    }
    let Some(ai) = ai_provider(config) else {
        tracing::warn!("Virtual Citizen Assistant unavailable: no AI provider configured");
        return None;
    };
    Some(CitizenAssistant::new(
        ai,
        ServiceCatalog::new(config.citizen.max_search_results),
        SchedulingDesk::new(),
        config.citizen.max_history,
    ))
}

fn build_document_agent(config: &AppConfig) -> Option<DocumentEligibilityAgent> {
    if !config.features.enable_document_agent {
        return None;
    }
    let analyzer: Arc<dyn DocumentAnalyzer> = if config.eligibility.use_mock_services {
        Arc::new(MockDocumentAnalyzer::new())
    } else {
        Arc::new(TextDocumentAnalyzer::new())
    };
    Some(DocumentEligibilityAgent::new(
        Arc::new(MockInbox::new()),
        analyzer,
        config.eligibility.default_program.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureFlags;
    use crate::domain::compliance::RuleSet;

    const POLICY: &str = "# Evacuation Policy\n\nPURPOSE\nDefines evacuation duties.\n\n\
SCOPE\nAll staff.\n\nRESPONSIBILITIES\nContact the emergency office.\n";

    fn full_manager() -> AgentManager {
        let weather = Arc::new(StaticWeatherProvider::new());
        AgentManager::new(Agents {
            coordinator: Some(Arc::new(EmergencyCoordinator::new(
                weather,
                Arc::new(InMemoryPlanRepository::new()),
            ))),
            policy_checker: Some(Arc::new(
                PolicyComplianceChecker::with_builtin_rules(None).unwrap(),
            )),
            ..Default::default()
        })
    }

    fn task_data(policies: Vec<&str>) -> Value {
        json!({
            "scenario": {
                "incident_type": "flood",
                "severity_level": 3,
                "location": "Brooklyn, NY",
                "description": "River overflow"
            },
            "policies": policies
        })
    }

    #[tokio::test]
    async fn initialize_with_defaults() {
        let manager = AgentManager::initialize(&AppConfig::default()).await;
        let status = manager.status();
        assert!(status.emergency_response.available);
        assert!(status.policy_compliance.available);
        assert!(!status.citizen_assistant.available);
        assert_eq!(status.citizen_assistant.status, "unavailable");
        assert!(status.document_eligibility.available);
        assert_eq!(status.system_status, "operational");
        assert_eq!(manager.coordinator().unwrap().weather_provider_name(), "static");
        assert!(!manager.policy_checker().unwrap().has_ai());
    }

    #[tokio::test]
    async fn disabled_features_stay_unavailable() {
        let config = AppConfig {
            features: FeatureFlags {
                enable_policy_checker: false,
                enable_document_agent: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let manager = AgentManager::initialize(&config).await;
        assert!(manager.policy_checker().is_none());
        assert!(manager.document_agent().is_none());
        assert!(manager.coordinator().is_some());
    }

    #[tokio::test]
    async fn missing_rules_file_disables_checker() {
        let mut config = AppConfig::default();
        config.compliance.rules_path = Some("/nonexistent/rules.json".into());
        let manager = AgentManager::initialize(&config).await;
        assert!(manager.policy_checker().is_none());
        assert!(manager.coordinator().is_some());
    }

    #[tokio::test]
    async fn uninitialized_reports_initializing() {
        let status = AgentManager::uninitialized().status();
        assert_eq!(status.system_status, "initializing");
        assert!(!status.emergency_response.available);
    }

    #[tokio::test]
    async fn collaborate_runs_both_agents() {
        let manager = full_manager();
        let result = manager
            .collaborate(EMERGENCY_POLICY_CHECK, task_data(vec![POLICY, POLICY]))
            .await
            .unwrap();

        let emergency = result.emergency_response.unwrap();
        assert!(emergency.plan_id.starts_with("plan_scenario_"));
        assert_eq!(result.policy_compliance.len(), 2);
        assert_eq!(result.collaboration_summary, COLLABORATION_SUMMARY);

        let tasks = manager.recent_tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, result.task_id);
        assert_eq!(tasks[0].results.len(), 2);
        assert!(tasks[0].status.is_finished());
    }

    #[tokio::test]
    async fn collaborate_without_policies_skips_checker() {
        let result = full_manager()
            .collaborate(EMERGENCY_POLICY_CHECK, task_data(vec![]))
            .await
            .unwrap();
        assert!(result.emergency_response.is_some());
        assert!(result.policy_compliance.is_empty());
    }

    #[tokio::test]
    async fn policy_errors_are_reported_inline() {
        let manager = AgentManager::new(Agents {
            policy_checker: Some(Arc::new(PolicyComplianceChecker::new(RuleSet::default(), None))),
            ..Default::default()
        });
        let result = manager
            .collaborate(EMERGENCY_POLICY_CHECK, task_data(vec![POLICY]))
            .await
            .unwrap();
        assert!(result.emergency_response.is_none());
        assert!(result.policy_compliance[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("No compliance rules loaded"));
    }

    #[tokio::test]
    async fn unknown_task_type_is_rejected() {
        let err = full_manager().collaborate("audit", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown task type: audit");
        assert_eq!(err.code(), ErrorCode::UnknownTaskType);
    }

    #[tokio::test]
    async fn incomplete_scenario_is_rejected() {
        let manager = full_manager();
        let err = manager
            .collaborate(
                EMERGENCY_POLICY_CHECK,
                json!({"scenario": {"incident_type": "fire"}}),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(manager.recent_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn task_log_is_bounded_newest_first() {
        let manager = AgentManager::new(Agents::default());
        for _ in 0..(TASK_LOG_LIMIT + 5) {
            manager
                .collaborate(EMERGENCY_POLICY_CHECK, task_data(vec![]))
                .await
                .unwrap();
        }
        let last = manager
            .collaborate(EMERGENCY_POLICY_CHECK, task_data(vec![]))
            .await
            .unwrap();
        let tasks = manager.recent_tasks().await;
        assert_eq!(tasks.len(), TASK_LOG_LIMIT);
        assert_eq!(tasks[0].task_id, last.task_id);
    }
}
