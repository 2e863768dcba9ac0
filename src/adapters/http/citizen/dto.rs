//! Request and response bodies for the citizen assistant.

use serde::{Deserialize, Serialize};

use crate::application::ChatOutcome;
use crate::domain::citizen::{ChatMessage, CitizenQuery, Priority, QueryType};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub service: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub query_type: QueryType,
    pub priority: Priority,
    pub address: Option<String>,
    pub plugins_used: Vec<String>,
    pub response_time_ms: u64,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        let ChatOutcome { query, response } = outcome;
        Self {
            success: true,
            response: response.response_text,
            query_type: query.query_type,
            priority: query.priority,
            address: query.address,
            plugins_used: query.plugins_used,
            response_time_ms: query.response_time_ms.unwrap_or(response.processing_time_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResponse {
    pub success: bool,
    pub query_type: QueryType,
    pub priority: Priority,
    pub address: Option<String>,
}

impl From<CitizenQuery> for ClassificationResponse {
    fn from(query: CitizenQuery) -> Self {
        Self {
            success: true,
            query_type: query.query_type,
            priority: query.priority,
            address: query.address,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<ChatMessage>,
}

/// Plain-text answer from one of the assistant's desks.
#[derive(Debug, Clone, Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub text: String,
}

impl TextResponse {
    pub fn new(text: String) -> Self {
        Self {
            success: true,
            text,
        }
    }
}
