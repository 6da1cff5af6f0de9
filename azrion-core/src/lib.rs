//! # Azrion Core Library
//!
//! Everything the assistant knows about you lives in one [`MemoryDocument`]:
//!
//! - **Short-term history**: the bounded window of recent messages sent to the model
//! - **Full archive**: every message ever exchanged, searchable on demand
//! - **Signals**: word frequencies, habit keywords, philosophy preferences
//! - **Tasks**: a pending/done to-do list used for reminders
//!
//! The [`dispatch::Dispatcher`] resolves natural-language input such as
//! `"open youtube"` or `"create folder demo in Documents"` to exactly one
//! system action, or to nothing, in which case the caller falls through to
//! the language model.
//!
//! Nothing in this crate panics or propagates errors on user input: trackers
//! tolerate any string, storage falls back to a fresh document, and every
//! dispatcher action converts its own failures into a reply string.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod phrases;
pub mod search;
pub mod store;
pub mod summary;
pub mod tasks;
pub mod trackers;

pub use config::AzrionConfig;
pub use error::AzrionError;
pub use memory::{MemoryDocument, Message, Role, Task, TaskStatus};
pub use store::MemoryStore;
