//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the agents and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat completions (OpenAI, Azure OpenAI)
//! - `WeatherProvider` - Conditions, forecasts and alerts by coordinates
//! - `PlanRepository` - Storage for emergency response plans
//! - `MailSource` - Applicant mailbox and attachments
//! - `DocumentAnalyzer` - Field extraction from document bytes

mod ai_provider;
mod document_analyzer;
mod mail_source;
mod plan_repository;
mod weather_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use document_analyzer::DocumentAnalyzer;
pub use mail_source::{
    is_supported_attachment, MailMessage, MailSource, SUPPORTED_ATTACHMENT_EXTENSIONS,
};
pub use plan_repository::{PlanRepository, PlanStoreError};
pub use weather_provider::{check_coordinates, WeatherError, WeatherProvider};
