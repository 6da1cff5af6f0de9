//! # azrion-llm: Chat-Model Boundary for Azrion
//!
//! Everything that leaves the process for a language model goes through
//! this crate:
//!   - **Ollama** `/api/chat` (local, default)
//!   - **OpenAI-compatible** `/v1/chat/completions`
//!   - **None**, which fails fast so the caller can degrade gracefully
//!
//! The [`ChatModel`] trait is the seam the conversation layer depends on;
//! [`LlmClient`] is the HTTP implementation, with per-request timeouts,
//! retries and tolerant reply extraction.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{LlmClient, LlmProvider};
pub use error::LlmError;
pub use types::{ChatMessage, ChatModel, ChatRequest, ChatResponse, ChatRole};
