//! The provider trait and its request/response types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One chat message in a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// A text generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// A single-user-message request, the shape SQL generation uses.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: None,
            temperature: None,
        }
    }

    /// Content of the last user message, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

/// A provider's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Raw generated text, before any SQL extraction.
    pub text: String,
    /// Model that actually answered.
    pub model: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
}

/// A text generation backend.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a completion for the given messages.
    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse>;

    fn provider_name(&self) -> &str;

    fn default_model(&self) -> &str;

    /// Cheap reachability probe; `Ok(false)` means the endpoint answered
    /// badly, an `Err` never escapes here.
    async fn health_check(&self) -> LlmResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_prompt_builds_one_user_message() {
        let request = GenerationRequest::from_prompt("count the rows");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.last_user_message(), Some("count the rows"));
        assert!(request.max_tokens.is_none());
        assert!(request.temperature.is_none());
    }

    #[test]
    fn last_user_message_skips_other_roles() {
        let request = GenerationRequest {
            messages: vec![
                ChatMessage::system("be terse"),
                ChatMessage::user("first"),
                ChatMessage::assistant("SELECT 1"),
                ChatMessage::user("second"),
            ],
            max_tokens: None,
            temperature: None,
        };
        assert_eq!(request.last_user_message(), Some("second"));
    }
}
