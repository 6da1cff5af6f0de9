//! Case-insensitive substring search over the full message archive.

use crate::memory::Message;

/// Reply used when a search finds nothing.
pub const NO_MATCHES: &str = "No matches found in history.";

/// Previews longer than this many characters are shortened.
const PREVIEW_CHARS: usize = 200;

/// Archive entries whose content contains `query` (case-insensitive,
/// surrounding whitespace ignored), oldest first, at most `limit`.
///
/// Each hit is rendered as `[<time>] <preview>`.
#[must_use]
pub fn search_archive(archive: &[Message], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    archive
        .iter()
        .filter(|m| m.content.to_lowercase().contains(&needle))
        .take(limit)
        .map(format_hit)
        .collect()
}

fn format_hit(message: &Message) -> String {
    let time = if message.time.is_empty() { "?" } else { message.time.as_str() };
    format!("[{time}] {}", preview(&message.content))
}

/// The content itself if short, else its first 197 characters plus `...`.
#[must_use]
pub fn preview(content: &str) -> String {
    if content.chars().count() < PREVIEW_CHARS {
        content.to_string()
    } else {
        let mut short: String = content.chars().take(PREVIEW_CHARS - 3).collect();
        short.push_str("...");
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Role;

    fn msg(content: &str, time: &str) -> Message {
        Message {
            role: Role::User,
            content: content.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn matches_case_insensitively_in_order() {
        let archive = vec![
            msg("Rust borrow checker", "t1"),
            msg("python stuff", "t2"),
            msg("more RUST", "t3"),
        ];
        let hits = search_archive(&archive, "  rust ", 10);
        assert_eq!(hits, vec!["[t1] Rust borrow checker", "[t3] more RUST"]);
    }

    #[test]
    fn caps_results() {
        let archive: Vec<_> = (0..10).map(|i| msg(&format!("note {i}"), "t")).collect();
        let hits = search_archive(&archive, "note", 6);
        assert_eq!(hits.len(), 6);
        assert_eq!(hits[5], "[t] note 5");
    }

    #[test]
    fn long_content_is_previewed() {
        let long = "x".repeat(250);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 200);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn missing_time_shows_placeholder() {
        let hits = search_archive(&[msg("hello", "")], "hello", 1);
        assert_eq!(hits, vec!["[?] hello"]);
    }
}
