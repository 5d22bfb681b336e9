pub mod chat_completions;

pub use chat_completions::ChatCompletionsClient;

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion request, serialized as the OpenAI-compatible body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// A service that turns a prompt into generated text.
pub trait CompletionProvider: Send + Sync {
    /// Send the request and return the text of the first choice.
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// Name of this provider (for diagnostics).
    fn provider_name(&self) -> &str;
}
