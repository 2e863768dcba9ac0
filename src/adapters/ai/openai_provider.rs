//! OpenAI Provider - AIProvider over the OpenAI chat-completions API.
//!
//! Two deployments speak the same wire format:
//!
//! - **OpenAI**: bearer auth against `{base_url}/chat/completions`
//! - **Azure OpenAI**: `api-key` header against
//!   `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=V`
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::azure(endpoint, api_key, "gpt-4", "2024-06-01")
//!     .with_timeout(Duration::from_secs(120))
//!     .with_max_retries(3);
//!
//! let provider = OpenAIProvider::new(config);
//! ```
//!
//! Transient failures (rate limits, 5xx, network, timeouts) are retried
//! with exponential backoff: 1s, 2s, 4s, ...

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::AiConfig;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Which API surface the provider talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFlavor {
    OpenAI {
        base_url: String,
    },
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Endpoint flavour.
    pub flavor: ApiFlavor,
    /// Model name sent in the body (ignored by Azure, which routes by deployment).
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// First backoff delay; doubles on each retry.
    pub retry_base_delay: Duration,
}

impl OpenAIConfig {
    /// Creates an OpenAI configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            flavor: ApiFlavor::OpenAI {
                base_url: "https://api.openai.com/v1".to_string(),
            },
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }

    /// Creates an Azure OpenAI configuration.
    pub fn azure(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        let deployment = deployment.into();
        Self {
            flavor: ApiFlavor::Azure {
                endpoint: endpoint.into().trim_end_matches('/').to_string(),
                deployment: deployment.clone(),
                api_version: api_version.into(),
            },
            model: deployment,
            ..Self::new(api_key)
        }
    }

    /// Builds a configuration from application settings. Azure wins when
    /// fully configured; `None` when no provider is configured.
    pub fn from_settings(settings: &AiConfig) -> Option<Self> {
        let config = if settings.has_azure() {
            Self::azure(
                settings.azure_openai_endpoint.clone().unwrap_or_default(),
                settings.azure_openai_api_key.clone().unwrap_or_default(),
                settings
                    .azure_openai_deployment_name
                    .clone()
                    .unwrap_or_default(),
                settings.azure_openai_api_version.clone(),
            )
        } else if settings.has_openai() {
            Self::new(settings.openai_api_key.clone().unwrap_or_default())
                .with_model(settings.openai_model.clone())
        } else {
            return None;
        };
        Some(
            config
                .with_timeout(settings.timeout())
                .with_max_retries(settings.max_retries),
        )
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the OpenAI base URL. No effect on Azure configurations.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        if let ApiFlavor::OpenAI { ref mut base_url } = self.flavor {
            *base_url = url.into().trim_end_matches('/').to_string();
        }
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    fn is_azure(&self) -> bool {
        matches!(self.flavor, ApiFlavor::Azure { .. })
    }
}

/// OpenAI / Azure OpenAI provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        match &self.config.flavor {
            ApiFlavor::OpenAI { base_url } => format!("{}/chat/completions", base_url),
            ApiFlavor::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint, deployment, api_version
            ),
        }
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(ChatMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        ChatRequest {
            model: (!self.config.is_azure()).then(|| self.config.model.clone()),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends one request attempt.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_wire_request(request);
        let builder = self.client.post(self.completions_url()).json(&body);
        let builder = if self.config.is_azure() {
            builder.header("api-key", self.config.api_key())
        } else {
            builder.header("Authorization", format!("Bearer {}", self.config.api_key()))
        };

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AIError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else if e.is_connect() {
                AIError::network(format!("Connection failed: {}", e))
            } else {
                AIError::network(e.to_string())
            }
        })
    }

    /// Parses a response, mapping error statuses.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status.as_u16(), &body));
        }

        let wire: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
        into_completion(wire, &self.config.model)
    }
}

/// Maps a non-success HTTP status to an `AIError`.
fn map_error_status(status: u16, body: &str) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(body)),
        400 => {
            if body.contains("maximum context length") || body.contains("context_length_exceeded") {
                AIError::ContextTooLong(error_message(body))
            } else if body.contains("content_filter") {
                AIError::content_filtered(error_message(body))
            } else {
                AIError::InvalidRequest(error_message(body))
            }
        }
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_message(body))),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_message(body))),
    }
}

/// `error.message` from an API error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Parses "try again in Ns" from a rate-limit body; 30 seconds otherwise.
fn parse_retry_after(body: &str) -> u32 {
    let message = error_message(body);
    message
        .find("try again in ")
        .map(|idx| &message[idx + "try again in ".len()..])
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}

fn into_completion(wire: ChatResponse, default_model: &str) -> Result<CompletionResponse, AIError> {
    let choice = wire
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = FinishReason::from_api(choice.finish_reason.as_deref());
    if finish_reason == FinishReason::ContentFilter && choice.message.content.is_none() {
        return Err(AIError::content_filtered("response withheld by content filter"));
    }

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        usage: wire
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default(),
        model: wire.model.unwrap_or_else(|| default_model.to_string()),
        finish_reason,
    })
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    tracing::warn!(
                        agent = %request.metadata.agent,
                        operation = %request.metadata.operation,
                        error = %err,
                        attempts = retry_count + 1,
                        "AI completion failed"
                    );
                    return Err(err);
                }
                Err(err) => {
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let delay = self.config.retry_base_delay * (1u32 << retry_count.min(16));
                    tracing::debug!(error = %err, ?delay, "retrying AI completion");
                    sleep(delay).await;
                    retry_count += 1;
                }
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gpt-4o") || m.starts_with("gpt-4-turbo") => 128_000,
            m if m.contains("32k") => 32_768,
            m if m.starts_with("gpt-4") => 8_192,
            m if m.starts_with("gpt-35") || m.starts_with("gpt-3.5") => 16_385,
            _ => 128_000,
        };
        let name = if self.config.is_azure() {
            "azure_openai"
        } else {
            "openai"
        };
        ProviderInfo::new(name, &self.config.model, max_context)
    }
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("policy_compliance", "analyze"))
            .with_system_prompt("Be precise")
            .with_message(MessageRole::User, "Review this")
            .with_max_tokens(2000)
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(
            config.flavor,
            ApiFlavor::OpenAI {
                base_url: "https://custom.api.com".to_string()
            }
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn openai_url() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k"));
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn azure_url_routes_by_deployment() {
        let provider = OpenAIProvider::new(OpenAIConfig::azure(
            "https://city.openai.azure.com/",
            "k",
            "gpt-4",
            "2024-06-01",
        ));
        assert_eq!(
            provider.completions_url(),
            "https://city.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-06-01"
        );
        assert_eq!(provider.provider_info().name, "azure_openai");
    }

    #[test]
    fn settings_prefer_azure() {
        let settings = AiConfig {
            azure_openai_endpoint: Some("https://city.openai.azure.com".into()),
            azure_openai_api_key: Some("a".into()),
            azure_openai_deployment_name: Some("gpt-4".into()),
            openai_api_key: Some("o".into()),
            max_retries: 1,
            ..Default::default()
        };
        let config = OpenAIConfig::from_settings(&settings).unwrap();
        assert!(config.is_azure());
        assert_eq!(config.max_retries, 1);
        assert!(OpenAIConfig::from_settings(&AiConfig::default()).is_none());
    }

    #[test]
    fn wire_request_puts_system_prompt_first() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k"));
        let wire = provider.to_wire_request(&request());
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].content, "Review this");
        assert_eq!(wire.model.as_deref(), Some("gpt-4o-mini"));

        let azure = OpenAIProvider::new(OpenAIConfig::azure("https://x", "k", "d", "v"));
        assert!(azure.to_wire_request(&request()).model.is_none());
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(map_error_status(401, ""), AIError::AuthenticationFailed);
        assert!(matches!(map_error_status(429, ""), AIError::RateLimited { retry_after_secs: 30 }));
        assert!(matches!(map_error_status(400, "bad"), AIError::InvalidRequest(_)));
        assert!(matches!(
            map_error_status(400, r#"{"error":{"message":"maximum context length is 8192"}}"#),
            AIError::ContextTooLong(_)
        ));
        assert!(map_error_status(503, "").is_retryable());
        assert!(map_error_status(502, "").is_retryable());
    }

    #[test]
    fn retry_after_parsing() {
        let body = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(parse_retry_after(body), 12);
        assert_eq!(parse_retry_after(r#"{"error":{"message":"slow down"}}"#), 30);
    }

    #[test]
    fn completion_from_wire() {
        let wire: ChatResponse = serde_json::from_str(
            r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":"Hi"},"finish_reason":"stop"}],"usage":{"prompt_tokens":10,"completion_tokens":2}}"#,
        )
        .unwrap();
        let completion = into_completion(wire, "fallback").unwrap();
        assert_eq!(completion.content, "Hi");
        assert_eq!(completion.usage.total_tokens, 12);
        assert_eq!(completion.finish_reason, FinishReason::Stop);

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(into_completion(empty, "m"), Err(AIError::Parse(_))));
    }
}
