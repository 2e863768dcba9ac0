//! Application layer - The four civic agents and their manager.
//!
//! Each agent orchestrates domain logic over ports; the manager builds them
//! from configuration and runs multi-agent tasks.
//!
//! # Module Organization
//!
//! - `emergency_coordinator` - Scenario analysis, response plans, weather
//! - `policy_checker` - Rule checks and AI review of policy documents
//! - `citizen_assistant` - Classified chat over city service plugins
//! - `eligibility_agent` - Mailbox documents and program eligibility
//! - `agent_manager` - Agent construction, status, collaboration

mod agent_manager;
mod citizen_assistant;
mod eligibility_agent;
mod emergency_coordinator;
mod policy_checker;

pub use agent_manager::{
    AgentAvailability, AgentManager, AgentStatusReport, Agents, CollaborationError,
    CollaborationResult, CollaborationScenario, EmergencyResponseSummary, EMERGENCY_POLICY_CHECK,
    TASK_LOG_LIMIT,
};
pub use citizen_assistant::{AssistantError, ChatOutcome, CitizenAssistant};
pub use eligibility_agent::{
    ApplicantInfo, DocumentEligibilityAgent, DocumentProcessingResult, InboxOutcome,
    ProgramEligibility,
};
pub use emergency_coordinator::EmergencyCoordinator;
pub use policy_checker::PolicyComplianceChecker;
