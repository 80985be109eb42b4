//! Mock model client for local development and tests.

use super::{Conversation, ModelClient, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Deterministic stand-in for a real model.
///
/// `generate` echoes the prompt; conversations number their replies so callers
/// can tell whether history was carried over. A failing mock returns the same
/// error from every call.
pub struct MockModelClient {
    failure: Option<String>,
    conversations_started: AtomicUsize,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            failure: None,
            conversations_started: AtomicUsize::new(0),
        }
    }

    /// A client whose every call fails with `ProviderError::ApiError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            conversations_started: AtomicUsize::new(0),
        }
    }

    /// How many conversations have been opened so far.
    pub fn conversations_started(&self) -> usize {
        self.conversations_started.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::ApiError(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.check()?;
        Ok(format!("Mock response for: {}", prompt))
    }

    fn start_conversation(&self) -> Arc<dyn Conversation> {
        self.conversations_started.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockConversation {
            failure: self.failure.clone(),
            history: Mutex::new(Vec::new()),
        })
    }
}

pub struct MockConversation {
    failure: Option<String>,
    history: Mutex<Vec<String>>,
}

#[async_trait]
impl Conversation for MockConversation {
    async fn send(&self, message: &str) -> Result<String, ProviderError> {
        if let Some(message) = &self.failure {
            return Err(ProviderError::ApiError(message.clone()));
        }

        let mut history = self.history.lock().await;
        history.push(message.to_string());
        Ok(format!("Mock reply #{}: {}", history.len(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generate_echoes_prompt() {
        let client = MockModelClient::new();
        let text = client.generate("Explain recursion").await.unwrap();
        assert_eq!(text, "Mock response for: Explain recursion");
    }

    #[tokio::test]
    async fn conversation_numbers_turns() {
        let client = MockModelClient::new();
        let chat = client.start_conversation();

        assert_eq!(chat.send("hi").await.unwrap(), "Mock reply #1: hi");
        assert_eq!(chat.send("again").await.unwrap(), "Mock reply #2: again");
        assert_eq!(client.conversations_started(), 1);
    }

    #[tokio::test]
    async fn failing_client_fails_everywhere() {
        let client = MockModelClient::failing("quota exceeded");

        let err = client.generate("anything").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: quota exceeded");

        let chat = client.start_conversation();
        assert!(chat.send("hi").await.is_err());
    }
}
