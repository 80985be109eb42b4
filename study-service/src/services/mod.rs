pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod sessions;

pub use providers::{Conversation, ModelClient, ProviderError};
pub use sessions::SessionRegistry;
