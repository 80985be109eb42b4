//! Model client abstractions and implementations.
//!
//! A [`ModelClient`] offers single-shot generation plus multi-turn
//! [`Conversation`]s whose history lives inside the handle. Handlers and the
//! session registry only relay text through these traits, so the backend can
//! be swapped between Gemini and the local mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error type for model client operations.
///
/// The `Display` text is what callers see in the failure envelope.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by model provider")]
    RateLimited,

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for the provider error metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered(_) => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// A generative model backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider name, used as a metric and log label.
    fn name(&self) -> &'static str;

    /// Stateless single-shot generation.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Open a conversation with empty history.
    fn start_conversation(&self) -> Arc<dyn Conversation>;
}

/// A multi-turn conversation handle.
///
/// Implementations keep the ordered message history and serialize concurrent
/// `send` calls so turns never interleave.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Send the next user message and return the model's reply.
    async fn send(&self, message: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_is_caller_facing() {
        let err = ProviderError::ApiError("Gemini API error 400 Bad Request: API key not valid".into());
        assert_eq!(
            err.to_string(),
            "API error: Gemini API error 400 Bad Request: API key not valid"
        );
        assert_eq!(err.kind(), "api_error");
    }

    #[test]
    fn rate_limit_has_stable_label() {
        assert_eq!(ProviderError::RateLimited.kind(), "rate_limited");
    }
}
