//! Chat history and prompt assembly for the citizen assistant.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_MAX_HISTORY: usize = 10;

pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful virtual assistant for city services. You can help citizens with:
1. Finding information about city services (DocumentRetrieval plugin)
2. Getting service information by category (DocumentRetrieval plugin)
3. Checking appointment availability (Scheduling plugin)
4. Getting scheduling information (Scheduling plugin)
5. Answering general questions about municipal services

Available plugins and functions:
- DocumentRetrieval.search_city_services: for general service searches
- DocumentRetrieval.get_service_by_category: for category-specific searches
- Scheduling.check_availability: check appointment slots
- Scheduling.scheduling_info: general scheduling information
- Scheduling.list_schedulable_services: list all services that can be scheduled

Available service categories: sanitation, licensing, safety, recreation

Be helpful, friendly, and informative.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Rolling chat transcript. Oldest messages fall off once `max_messages`
/// is reached.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
    max_messages: usize,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl ChatHistory {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages: max_messages.max(1),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.len() == self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(ChatMessage::user(user));
        self.push(ChatMessage::assistant(assistant));
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Output of one plugin call, fed to the model as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginContext {
    pub plugin: String,
    pub output: String,
}

impl PluginContext {
    pub fn new(plugin: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            output: output.into(),
        }
    }
}

pub fn build_user_prompt(message: &str, context: &[PluginContext]) -> String {
    if context.is_empty() {
        return message.to_string();
    }
    let mut out = String::from("Relevant city service information:\n\n");
    for ctx in context {
        out.push_str(&format!("[{}]\n{}\n\n", ctx.plugin, ctx.output.trim_end()));
    }
    out.push_str(&format!("Citizen question: {}", message));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_drops_oldest_when_full() {
        let mut history = ChatHistory::new(3);
        history.record_exchange("a", "b");
        history.record_exchange("c", "d");
        let messages = history.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::assistant("b"));
        assert_eq!(messages[2], ChatMessage::assistant("d"));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let v = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["content"], "hi");
    }

    #[test]
    fn prompt_without_context_is_the_message() {
        assert_eq!(build_user_prompt("hello", &[]), "hello");
    }

    #[test]
    fn prompt_includes_plugin_outputs() {
        let ctx = [PluginContext::new(
            "Scheduling.check_availability",
            "Available appointments\n",
        )];
        let prompt = build_user_prompt("Can I book?", &ctx);
        assert!(prompt.contains("[Scheduling.check_availability]\nAvailable appointments\n\n"));
        assert!(prompt.ends_with("Citizen question: Can I book?"));
    }
}
