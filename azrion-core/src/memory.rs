//! The persisted memory document and its message/task records.
//!
//! Every field of [`MemoryDocument`] is independently defaulted on load, so
//! documents written by older or newer versions always deserialize into a
//! complete value.

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wall-clock format used for every message and task timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed or spoken by the user.
    User,
    /// Produced by the assistant (model reply or system action).
    Assistant,
}

/// A single timestamped conversation message. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Local timestamp, see [`TIMESTAMP_FORMAT`].
    #[serde(default)]
    pub time: String,
}

impl Message {
    /// Create a message stamped with the current time.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            time: timestamp_now(),
        }
    }

    /// Create a user message stamped with the current time.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message stamped with the current time.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Task lifecycle. Only `Pending -> Done` transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not finished yet; eligible for reminders.
    Pending,
    /// Completed.
    Done,
}

/// A to-do item the assistant nags about until it is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// What needs doing.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// When the task was added.
    #[serde(default)]
    pub time: String,
}

impl Task {
    /// Create a pending task stamped with the current time.
    #[must_use]
    pub fn pending(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: TaskStatus::Pending,
            time: timestamp_now(),
        }
    }

    /// Whether the task still awaits completion.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Philosophy
// ---------------------------------------------------------------------------

/// Philosophy preferences picked up from conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Philosophy {
    /// Schools mentioned by the user, first mention first, no duplicates.
    pub liked_schools: Vec<String>,
    /// Philosophers mentioned by the user, first mention first, no duplicates.
    pub favorite_philosophers: Vec<String>,
    /// Quotes the user typed between curly quotes, as `(attribution, text)`.
    pub favorite_quotes: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// MemoryDocument
// ---------------------------------------------------------------------------

/// The whole persisted state of the assistant.
///
/// Maps keep first-insertion order so summaries list topics and habits in
/// the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDocument {
    /// Recent messages, oldest first, bounded by the short-term limit.
    pub history: Vec<Message>,
    /// Every message ever recorded, oldest first. Append-only.
    pub full_history: Vec<Message>,
    /// Habit keyword -> number of turns mentioning it.
    pub habits: IndexMap<String, u64>,
    /// Free-form preferences carried through from older documents.
    pub preferences: serde_json::Map<String, serde_json::Value>,
    /// Lowercase word -> occurrence count.
    pub stats: IndexMap<String, u64>,
    /// The to-do list.
    pub tasks: Vec<Task>,
    /// Philosophy preferences.
    pub philosophy: Philosophy,
}

impl MemoryDocument {
    /// Create an empty document with every field present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the archive and the short-term history, then
    /// trim the history to `short_term_limit`.
    pub fn record(&mut self, message: Message, short_term_limit: usize) {
        self.full_history.push(message.clone());
        self.history.push(message);
        self.truncate_history(short_term_limit);
    }

    /// Drop the oldest short-term messages until at most `limit` remain.
    pub fn truncate_history(&mut self, limit: usize) {
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }
}
