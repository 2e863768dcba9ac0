//! Multi-agent task tracking.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{TaskId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl CoordinationStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, CoordinationStatus::Completed | CoordinationStatus::Failed)
    }
}

/// One agent's contribution to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent_id: String,
    pub agent_type: String,
    pub response_data: Value,
    pub confidence: f64,
    pub timestamp: Timestamp,
    pub processing_time_ms: u64,
}

/// A unit of work fanned out to several agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAgentTask {
    pub task_id: TaskId,
    pub task_type: String,
    pub description: String,
    pub assigned_agents: Vec<String>,
    pub status: CoordinationStatus,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub results: Vec<AgentResponse>,
}

impl MultiAgentTask {
    pub fn new(task_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_id: TaskId::new(),
            task_type: task_type.into(),
            description: description.into(),
            assigned_agents: Vec::new(),
            status: CoordinationStatus::Pending,
            created_at: Timestamp::now(),
            completed_at: None,
            results: Vec::new(),
        }
    }

    pub fn assign(&mut self, agent: impl Into<String>) {
        self.assigned_agents.push(agent.into());
    }

    pub fn start(&mut self) {
        self.status = CoordinationStatus::InProgress;
    }

    pub fn record(&mut self, response: AgentResponse) {
        self.results.push(response);
    }

    pub fn complete(&mut self) {
        self.finish(CoordinationStatus::Completed);
    }

    pub fn fail(&mut self) {
        self.finish(CoordinationStatus::Failed);
    }

    fn finish(&mut self, status: CoordinationStatus) {
        self.status = status;
        self.completed_at = Some(Timestamp::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_task_is_pending() {
        let task = MultiAgentTask::new("emergency_policy_check", "check");
        assert_eq!(task.status, CoordinationStatus::Pending);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn completing_sets_timestamp() {
        let mut task = MultiAgentTask::new("emergency_policy_check", "check");
        task.assign("emergency_response");
        task.start();
        task.record(AgentResponse {
            agent_id: "emergency_response".into(),
            agent_type: "coordinator".into(),
            response_data: json!({"plan_id": "p"}),
            confidence: 1.0,
            timestamp: Timestamp::now(),
            processing_time_ms: 3,
        });
        task.complete();
        assert!(task.status.is_finished());
        assert!(task.completed_at.is_some());
        assert_eq!(task.results.len(), 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&CoordinationStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
