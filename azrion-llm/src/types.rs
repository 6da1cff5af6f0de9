//! Chat request/response types and the model boundary trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Speaker of a chat message, as the chat APIs name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions and context.
    System,
    /// The human.
    User,
    /// The model.
    Assistant,
}

/// One message of a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    /// An assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// A complete chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name, e.g. `llama3.1:latest`.
    pub model: String,
    /// Transcript, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; the backend default when `None`.
    pub temperature: Option<f32>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ChatRequest {
    /// Create a request with the default two-minute timeout.
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            timeout_ms: 120_000,
        }
    }

    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// A model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// The reply text, never empty.
    pub text: String,
    /// Model that answered.
    pub model: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}

/// Anything that can answer a chat transcript.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the transcript and wait for the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;
}
