//! Session registry: one conversation per caller-supplied session id.
//!
//! Sessions are created lazily and kept for the lifetime of the process. There
//! is no eviction, TTL or size bound, so every distinct id costs memory until
//! shutdown. Evicting would silently drop a session's history mid-conversation,
//! which callers would observe.

use crate::services::metrics;
use crate::services::providers::{Conversation, ModelClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Session id used when a chat request does not name one.
pub const DEFAULT_SESSION_ID: &str = "default";

pub struct SessionRegistry {
    client: Arc<dyn ModelClient>,
    sessions: Mutex<HashMap<String, Arc<dyn Conversation>>>,
}

impl SessionRegistry {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the conversation for `session_id`, opening one on first use.
    ///
    /// Lookup and creation happen under a single lock, so concurrent first
    /// requests for the same id share one conversation.
    pub fn resolve(&self, session_id: &str) -> Arc<dyn Conversation> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(conversation) = sessions.get(session_id) {
            return Arc::clone(conversation);
        }

        let conversation = self.client.start_conversation();
        sessions.insert(session_id.to_string(), Arc::clone(&conversation));

        tracing::info!(
            session_id = %session_id,
            total_sessions = sessions.len(),
            provider = self.client.name(),
            "Started chat session"
        );
        metrics::inc_chat_sessions();

        conversation
    }

    /// Number of sessions held.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
