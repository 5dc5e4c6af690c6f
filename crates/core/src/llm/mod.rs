pub mod error;
pub mod lmstudio;

use crate::llm::error::InferenceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completion backend. Returns the raw content of the first choice.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    fn model(&self) -> &str;

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, InferenceError>;
}
