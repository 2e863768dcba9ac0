//! Citizen queries: intent, priority and entity extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{QueryId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    TrashPickup,
    Recycling,
    Permits,
    EmergencyAlerts,
    ParkInfo,
    GeneralInfo,
    #[default]
    Unknown,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::TrashPickup => "trash_pickup",
            QueryType::Recycling => "recycling",
            QueryType::Permits => "permits",
            QueryType::EmergencyAlerts => "emergency_alerts",
            QueryType::ParkInfo => "park_info",
            QueryType::GeneralInfo => "general_info",
            QueryType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Keyword lists checked in order; the first list with a hit wins.
const INTENT_KEYWORDS: &[(QueryType, &[&str])] = &[
    (
        QueryType::EmergencyAlerts,
        &["emergency", "alert", "urgent", "disaster", "evacuation"],
    ),
    (
        QueryType::TrashPickup,
        &["trash", "garbage", "pickup", "collection", "bin", "waste"],
    ),
    (
        QueryType::Recycling,
        &["recycl", "recycle", "blue bin", "compost"],
    ),
    (
        QueryType::Permits,
        &["permit", "license", "application", "business", "construction"],
    ),
    (
        QueryType::ParkInfo,
        &[
            "park",
            "playground",
            "recreation",
            "hours",
            "central park",
            "prospect park",
        ],
    ),
];

const URGENT_KEYWORDS: &[&str] = &["urgent", "emergency", "immediate", "asap"];

static STREET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+\s+[\w\s]+(?:street|st|avenue|ave|road|rd|boulevard|blvd|place|pl|drive|dr)\b",
    )
    .expect("street address pattern must compile")
});

static LOOSE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+\s+\w+\s+\w+\b").expect("loose address pattern must compile")
});

/// Classifies a message by keyword. Messages matching nothing are general.
pub fn classify_query_intent(message: &str) -> QueryType {
    let lower = message.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(kind, _)| *kind)
        .unwrap_or(QueryType::GeneralInfo)
}

pub fn determine_priority(query_type: QueryType, message: &str) -> Priority {
    if query_type == QueryType::EmergencyAlerts {
        return Priority::Urgent;
    }
    let lower = message.to_lowercase();
    if URGENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Priority::High;
    }
    match query_type {
        QueryType::Permits | QueryType::GeneralInfo => Priority::Medium,
        _ => Priority::Low,
    }
}

/// First street-style address in the message, falling back to any
/// "<number> <word> <word>" run.
pub fn extract_address(message: &str) -> Option<String> {
    [&*STREET_ADDRESS, &*LOOSE_ADDRESS]
        .iter()
        .find_map(|re| re.find(message))
        .map(|m| m.as_str().trim().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntities {
    pub address: Option<String>,
    pub query_type: QueryType,
    pub priority: Priority,
}

pub fn extract_entities(message: &str) -> QueryEntities {
    let query_type = classify_query_intent(message);
    QueryEntities {
        address: extract_address(message),
        query_type,
        priority: determine_priority(query_type, message),
    }
}

/// One citizen message with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenQuery {
    pub query_id: QueryId,
    pub user_message: String,
    pub session_id: String,
    pub timestamp: Timestamp,
    pub query_type: QueryType,
    pub priority: Priority,
    pub address: Option<String>,
    pub service_type: Option<String>,
    pub location: Option<String>,
    pub response: Option<String>,
    pub plugins_used: Vec<String>,
    pub response_time_ms: Option<u64>,
    pub confidence_score: Option<f64>,
}

impl CitizenQuery {
    /// Classifies the message and extracts its address up front.
    pub fn new(user_message: impl Into<String>, session_id: impl Into<String>) -> Self {
        let user_message = user_message.into();
        let entities = extract_entities(&user_message);
        Self {
            query_id: QueryId::new(),
            session_id: session_id.into(),
            timestamp: Timestamp::now(),
            query_type: entities.query_type,
            priority: entities.priority,
            address: entities.address,
            service_type: None,
            location: None,
            response: None,
            plugins_used: Vec::new(),
            response_time_ms: None,
            confidence_score: None,
            user_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Answer to a query, with where it came from and what to ask next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query_id: QueryId,
    pub response_text: String,
    pub confidence_score: f64,
    pub plugins_used: Vec<String>,
    pub processing_time_ms: u64,
    pub sources: Vec<SourceRef>,
    pub follow_up_suggestions: Vec<String>,
}

impl QueryResponse {
    pub fn new(query_id: QueryId, response_text: impl Into<String>) -> Self {
        Self {
            query_id,
            response_text: response_text.into(),
            confidence_score: 0.0,
            plugins_used: Vec::new(),
            processing_time_ms: 0,
            sources: Vec::new(),
            follow_up_suggestions: Vec::new(),
        }
    }

    pub fn add_source(
        &mut self,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) {
        self.sources.push(SourceRef {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        });
    }

    pub fn add_follow_up(&mut self, suggestion: impl Into<String>) {
        self.follow_up_suggestions.push(suggestion.into());
    }
}
