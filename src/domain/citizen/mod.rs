//! Citizen domain - Query classification and the assistant's plugins.
//!
//! # Module Organization
//!
//! - `query` - Intent, priority and address extraction
//! - `scheduling` - Appointment desk
//! - `service_catalog` - City service lookup
//! - `conversation` - Chat history and prompt assembly

mod conversation;
mod query;
mod scheduling;
mod service_catalog;

pub use conversation::{
    build_user_prompt, ChatHistory, ChatMessage, ChatRole, PluginContext, ASSISTANT_SYSTEM_PROMPT,
    DEFAULT_MAX_HISTORY,
};
pub use query::{
    classify_query_intent, determine_priority, extract_address, extract_entities, CitizenQuery,
    Priority, QueryEntities, QueryResponse, QueryType, SourceRef,
};
pub use scheduling::{AppointmentSlot, SchedulingDesk, SCHEDULABLE_SERVICES};
pub use service_catalog::{ServiceCatalog, ServiceEntry, DEFAULT_SEARCH_RESULTS};
