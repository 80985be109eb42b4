//! Gemini model client.
//!
//! Talks to Google's `generateContent` REST endpoint. Conversations resend the
//! full history every turn; the API itself is stateless.

use super::{Conversation, ModelClient, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini model client. Cheap to share; conversations hold a reference to the
/// same HTTP connection pool.
pub struct GeminiClient {
    inner: Arc<GeminiInner>,
}

struct GeminiInner {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            inner: Arc::new(GeminiInner { config, http }),
        })
    }

    pub fn model(&self) -> &str {
        &self.inner.config.model
    }
}

impl GeminiInner {
    /// Build the API URL for the given method. Carries the key, never log it.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method,
            self.config.api_key.expose_secret()
        )
    }

    async fn generate_content(&self, contents: &[Content]) -> Result<String, ProviderError> {
        let request = GenerateContentRequest { contents };

        tracing::debug!(
            model = %self.config.model,
            turns = contents.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .http
            .traced_post(&self.api_url("generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                ProviderError::ApiError(format!("Failed to parse response: {}", e.without_url()))
            })?;

        api_response.into_text()
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.inner
            .generate_content(&[Content::text(Role::User, prompt)])
            .await
    }

    fn start_conversation(&self) -> Arc<dyn Conversation> {
        Arc::new(GeminiConversation {
            inner: Arc::clone(&self.inner),
            history: Mutex::new(Vec::new()),
        })
    }
}

/// A Gemini chat: the accumulated `contents` sent with every turn.
pub struct GeminiConversation {
    inner: Arc<GeminiInner>,
    history: Mutex<Vec<Content>>,
}

#[async_trait]
impl Conversation for GeminiConversation {
    async fn send(&self, message: &str) -> Result<String, ProviderError> {
        // Held across the request so turns on one conversation never interleave.
        let mut history = self.history.lock().await;

        history.push(Content::text(Role::User, message));
        match self.inner.generate_content(&history).await {
            Ok(reply) => {
                history.push(Content::text(Role::Model, &reply));
                Ok(reply)
            }
            Err(e) => {
                // A failed turn leaves no trace in the history.
                history.pop();
                Err(e)
            }
        }
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Role, text: &str) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::ContentFiltered(format!(
                "prompt blocked ({})",
                reason
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::ContentFiltered(
                "response blocked (SAFETY)".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}
