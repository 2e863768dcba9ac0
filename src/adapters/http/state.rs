//! Shared handler state.

use std::sync::Arc;

use super::error::ApiError;
use crate::application::{
    AgentManager, CitizenAssistant, DocumentEligibilityAgent, EmergencyCoordinator,
    PolicyComplianceChecker,
};

/// Cloned into every handler; the agents live behind the manager.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<AgentManager>,
}

impl AppState {
    pub fn new(manager: Arc<AgentManager>) -> Self {
        Self { manager }
    }

    pub fn coordinator(&self) -> Result<Arc<EmergencyCoordinator>, ApiError> {
        self.manager
            .coordinator()
            .ok_or_else(|| ApiError::unavailable("Emergency Response Coordinator"))
    }

    pub fn policy_checker(&self) -> Result<Arc<PolicyComplianceChecker>, ApiError> {
        self.manager
            .policy_checker()
            .ok_or_else(|| ApiError::unavailable("Policy Compliance Checker"))
    }

    pub fn citizen_assistant(&self) -> Result<Arc<CitizenAssistant>, ApiError> {
        self.manager
            .citizen_assistant()
            .ok_or_else(|| ApiError::unavailable("Virtual Citizen Assistant"))
    }

    pub fn document_agent(&self) -> Result<Arc<DocumentEligibilityAgent>, ApiError> {
        self.manager
            .document_agent()
            .ok_or_else(|| ApiError::unavailable("Document Eligibility Agent"))
    }
}
