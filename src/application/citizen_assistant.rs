//! Virtual Citizen Assistant.
//!
//! Answers citizen questions about city services. Each message is
//! classified first; the matching plugins (service catalog, scheduling
//! desk) are consulted and their output is handed to the language model
//! alongside the recent conversation.

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::citizen::{
    build_user_prompt, ChatHistory, ChatMessage, ChatRole, CitizenQuery, PluginContext, QueryResponse,
    QueryType, SchedulingDesk, ServiceCatalog, ASSISTANT_SYSTEM_PROMPT,
};
use crate::domain::foundation::{truncate_chars, DomainError, ErrorCode};
use crate::ports::{AIError, AIProvider, CompletionRequest, Message, RequestMetadata};

const AGENT: &str = "citizen_assistant";
const SESSION_ID: &str = "web";
const SNIPPET_CHARS: usize = 160;
const SCHEDULING_TERMS: [&str; 4] = ["appointment", "schedule", "scheduling", "book"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssistantError {
    #[error("Message required")]
    EmptyMessage,

    #[error("Assistant reply failed: {0}")]
    Ai(#[from] AIError),
}

impl AssistantError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AssistantError::EmptyMessage => ErrorCode::ValidationFailed,
            AssistantError::Ai(e) => e.code(),
        }
    }
}

impl From<AssistantError> for DomainError {
    fn from(err: AssistantError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// A classified query with the assistant's answer attached.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub query: CitizenQuery,
    pub response: QueryResponse,
}

pub struct CitizenAssistant {
    ai: Arc<dyn AIProvider>,
    catalog: ServiceCatalog,
    desk: SchedulingDesk,
    history: Mutex<ChatHistory>,
}

impl CitizenAssistant {
    pub fn new(
        ai: Arc<dyn AIProvider>,
        catalog: ServiceCatalog,
        desk: SchedulingDesk,
        max_history: usize,
    ) -> Self {
        Self {
            ai,
            catalog,
            desk,
            history: Mutex::new(ChatHistory::new(max_history)),
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn desk(&self) -> &SchedulingDesk {
        &self.desk
    }

    /// Classification without talking to the model.
    pub fn classify(&self, message: &str) -> Result<CitizenQuery, AssistantError> {
        if message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        Ok(CitizenQuery::new(message.trim(), SESSION_ID))
    }

    pub async fn chat(&self, message: &str) -> Result<ChatOutcome, AssistantError> {
        let started = Instant::now();
        let mut query = self.classify(message)?;
        let mut response = QueryResponse::new(query.query_id, "");

        let context = self.consult_plugins(&query, &mut response);
        let plugins_used: Vec<String> = context.iter().map(|c| c.plugin.clone()).collect();
        tracing::debug!(
            query_type = %query.query_type,
            priority = query.priority.as_str(),
            plugins = ?plugins_used,
            "citizen query classified"
        );

        let history = self.history.lock().await.messages();
        let request = CompletionRequest::new(RequestMetadata::new(AGENT, "chat"))
            .with_system_prompt(ASSISTANT_SYSTEM_PROMPT)
            .with_messages(history.into_iter().map(|m| match m.role {
                ChatRole::User => Message::user(m.content),
                ChatRole::Assistant => Message::assistant(m.content),
            }))
            .with_messages([Message::user(build_user_prompt(&query.user_message, &context))]);

        let reply = self.ai.complete(request).await.map_err(|e| {
            tracing::warn!("Citizen assistant reply failed: {}", e);
            e
        })?;

        self.history
            .lock()
            .await
            .record_exchange(query.user_message.clone(), reply.content.clone());

        let elapsed_ms = started.elapsed().as_millis() as u64;
        query.response = Some(reply.content.clone());
        query.plugins_used = plugins_used.clone();
        query.response_time_ms = Some(elapsed_ms);

        response.response_text = reply.content;
        response.plugins_used = plugins_used;
        response.processing_time_ms = elapsed_ms;

        Ok(ChatOutcome { query, response })
    }

    pub async fn get_chat_history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.messages()
    }

    /// Runs the plugins relevant to the query type and records catalog
    /// hits as sources on `response`.
    fn consult_plugins(&self, query: &CitizenQuery, response: &mut QueryResponse) -> Vec<PluginContext> {
        let message = &query.user_message;
        let lower = message.to_lowercase();
        let mut context = Vec::new();

        let category = match query.query_type {
            QueryType::Permits => {
                let service = if lower.contains("license") { "License" } else { "Permit" };
                context.push(PluginContext::new(
                    "Scheduling.check_availability",
                    self.desk.check_availability(service),
                ));
                Some("licensing")
            }
            QueryType::TrashPickup | QueryType::Recycling => Some("sanitation"),
            QueryType::ParkInfo => Some("recreation"),
            QueryType::EmergencyAlerts => Some("safety"),
            QueryType::GeneralInfo | QueryType::Unknown => None,
        };

        match category {
            Some(category) => {
                for entry in self.catalog.by_category(category) {
                    response.add_source(&entry.title, "", truncate_chars(&entry.content, SNIPPET_CHARS));
                }
                context.push(PluginContext::new(
                    "DocumentRetrieval.get_service_by_category",
                    self.catalog.get_service_by_category(category),
                ));
            }
            None => {
                for entry in self.catalog.search(message) {
                    response.add_source(&entry.title, "", truncate_chars(&entry.content, SNIPPET_CHARS));
                }
                context.push(PluginContext::new(
                    "DocumentRetrieval.search_city_services",
                    self.catalog.search_city_services(message),
                ));
                if SCHEDULING_TERMS.iter().any(|t| lower.contains(t)) {
                    context.push(PluginContext::new(
                        "Scheduling.scheduling_info",
                        self.desk.scheduling_info(message),
                    ));
                }
            }
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::citizen::{Priority, DEFAULT_SEARCH_RESULTS};
    use crate::ports::MessageRole;

    fn assistant(ai: MockAIProvider, max_history: usize) -> CitizenAssistant {
        CitizenAssistant::new(
            Arc::new(ai),
            ServiceCatalog::new(DEFAULT_SEARCH_RESULTS),
            SchedulingDesk::new(),
            max_history,
        )
    }

    #[tokio::test]
    async fn trash_question_consults_sanitation() {
        let ai = MockAIProvider::new().with_response("Pickup is on Tuesdays.");
        let assistant = assistant(ai.clone(), 10);

        let outcome = assistant
            .chat("When is trash pickup at 123 Main Street?")
            .await
            .unwrap();
        assert_eq!(outcome.query.query_type, QueryType::TrashPickup);
        assert_eq!(outcome.query.address.as_deref(), Some("123 Main Street"));
        assert_eq!(outcome.query.response.as_deref(), Some("Pickup is on Tuesdays."));
        assert_eq!(
            outcome.query.plugins_used,
            vec!["DocumentRetrieval.get_service_by_category"]
        );
        assert!(!outcome.response.sources.is_empty());

        let prompt = ai.get_calls()[0].last_user_message().unwrap();
        assert!(prompt.starts_with("Relevant city service information:"));
        assert!(prompt.ends_with("Citizen question: When is trash pickup at 123 Main Street?"));
    }

    #[tokio::test]
    async fn permit_question_checks_availability() {
        let assistant = assistant(MockAIProvider::new(), 10);
        let outcome = assistant.chat("I need a building permit").await.unwrap();
        assert_eq!(outcome.query.priority, Priority::Medium);
        assert_eq!(
            outcome.query.plugins_used,
            vec![
                "Scheduling.check_availability",
                "DocumentRetrieval.get_service_by_category"
            ]
        );
    }

    #[tokio::test]
    async fn general_question_searches_and_adds_scheduling() {
        let assistant = assistant(MockAIProvider::new(), 10);
        let outcome = assistant
            .chat("How do I schedule an appointment at city hall?")
            .await
            .unwrap();
        assert_eq!(outcome.query.query_type, QueryType::GeneralInfo);
        assert!(outcome
            .query
            .plugins_used
            .contains(&"Scheduling.scheduling_info".to_string()));
    }

    #[tokio::test]
    async fn history_is_sent_and_bounded() {
        let ai = MockAIProvider::new();
        let assistant = assistant(ai.clone(), 2);

        assistant.chat("first question").await.unwrap();
        assistant.chat("second question").await.unwrap();

        let second_call = &ai.get_calls()[1];
        assert_eq!(second_call.messages.len(), 3);
        assert_eq!(second_call.messages[0].role, MessageRole::User);
        assert_eq!(second_call.messages[0].content, "first question");

        let history = assistant.get_chat_history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "second question");
        assert_eq!(history[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let ai = MockAIProvider::new();
        let assistant = assistant(ai.clone(), 10);
        assert_eq!(
            assistant.chat("   ").await.unwrap_err(),
            AssistantError::EmptyMessage
        );
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn ai_failure_leaves_history_untouched() {
        let assistant = assistant(
            MockAIProvider::new().with_error(AIError::unavailable("maintenance")),
            10,
        );
        let err = assistant.chat("Where is the park?").await.unwrap_err();
        assert!(matches!(err, AssistantError::Ai(_)));
        assert!(assistant.get_chat_history().await.is_empty());
    }
}
