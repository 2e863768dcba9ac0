//! Request and response bodies for multi-agent endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{AgentStatusReport, CollaborationResult};
use crate::domain::emergency::MultiAgentTask;

#[derive(Debug, Clone, Deserialize)]
pub struct CollaborateRequest {
    pub task_type: String,
    #[serde(default)]
    pub task_data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaborateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: CollaborationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AgentStatusReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<MultiAgentTask>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
