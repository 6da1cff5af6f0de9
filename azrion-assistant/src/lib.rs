//! # Azrion Assistant
//!
//! Wires the core memory and dispatcher to a chat model:
//!
//! - [`conversation::Assistant`]: the per-turn orchestrator
//! - [`console`]: the interactive prompt loop with typing animation
//!
//! The `azrion` binary builds both from `azrion.toml` and command-line flags.

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod conversation;

pub use console::{ConsoleCommand, ConsoleSettings};
pub use conversation::{Assistant, ConversationSettings};
