//! Fixtures shared by the Azrion benchmarks.

use azrion_core::memory::{MemoryDocument, Message};

/// A document whose archive holds `messages` alternating user/assistant turns.
#[must_use]
pub fn populated_document(messages: usize) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    for i in 0..messages {
        let message = if i % 2 == 0 {
            Message::user(format!("Turn {i}: still fighting that parser bug while the music plays"))
        } else {
            Message::assistant(format!("Reply {i}: stoicism says the obstacle is the way"))
        };
        doc.record(message, 12);
    }
    doc
}
