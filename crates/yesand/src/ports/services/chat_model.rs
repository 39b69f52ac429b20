//! Chat Model Port
//!
//! Abstract interface for chat-completion invocations, batch or streamed.
//! Implementations live in the server's adapter layer.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Message, Role};
use crate::domain::errors::DomainError;

/// Role of a message sent to the chat model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        match msg.role {
            Role::Human => Self::user(msg.content.clone()),
            Role::Ai => Self::assistant(msg.content.clone()),
        }
    }
}

/// Options for one chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Model identifier
    pub model: String,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }
}

/// Response from a batch completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text; empty when the model returned no content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Incremental text fragments of a streamed completion.
///
/// Dropping the stream must release the underlying connection.
pub type FragmentStream = BoxStream<'static, Result<String, DomainError>>;

/// Chat-completion capability
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate one complete reply
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// Open a streamed reply
    async fn stream(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<FragmentStream, DomainError>;

    /// Provider name (e.g., "openai")
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_roles_map_to_chat_roles() {
        assert_eq!(ChatMessage::from(&Message::human("hi")).role, MessageRole::User);
        assert_eq!(ChatMessage::from(&Message::ai("yes, and")).role, MessageRole::Assistant);
    }

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&ChatMessage::system("be kind")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"be kind"}"#);
    }
}
