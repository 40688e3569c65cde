//! LLM Provider Trait
//!
//! Defines the common interface for completion providers.

use async_trait::async_trait;

use super::types::{LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig};

/// Trait that all LLM providers must implement.
///
/// Calls are single-shot: no streaming, no retry. A failed call is terminal
/// for that invocation.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the default model being used.
    fn model(&self) -> &str;

    /// Send a message and get a complete response.
    ///
    /// # Arguments
    /// * `messages` - Conversation messages (user turns)
    /// * `system` - Optional system prompt
    /// * `request_options` - Temperature / model overrides
    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Error for a provider built without an API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Pull `error.message` out of an OpenAI-style error body; otherwise the raw body
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Map a non-success HTTP status to an error
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    let message = error_message(body);
    match status {
        401 | 403 => LlmError::AuthenticationFailed {
            message: format!("{}: {}", provider, message),
        },
        404 => LlmError::ModelNotFound { model: message },
        429 => LlmError::RateLimited { message },
        400 | 422 => LlmError::InvalidRequest { message },
        500..=599 => LlmError::ServerError {
            message,
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}
