//! One-line context summary sent to the model alongside the history.

use indexmap::IndexMap;

use crate::memory::MemoryDocument;

/// How many frequent words the summary lists.
pub const TOP_WORDS: usize = 5;

/// `Top topics: a, b, c. Habits: code:3, music:1.`
#[must_use]
pub fn summarize_context(doc: &MemoryDocument) -> String {
    let top = top_words(&doc.stats, TOP_WORDS).join(", ");
    let habits = doc
        .habits
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Top topics: {top}. Habits: {habits}.")
}

/// The `n` most frequent words; ties keep first-seen order.
#[must_use]
pub fn top_words(stats: &IndexMap<String, u64>, n: usize) -> Vec<&str> {
    let mut entries: Vec<(&String, &u64)> = stats.iter().collect();
    // Stable sort, so equal counts stay in insertion order.
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries.into_iter().take(n).map(|(k, _)| k.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_top_words_and_habits() {
        let mut doc = MemoryDocument::new();
        for (word, count) in [("hello", 1), ("rust", 4), ("bug", 2), ("tea", 2), ("a", 1), ("b", 1)] {
            doc.stats.insert(word.to_string(), count);
        }
        doc.habits.insert("code".into(), 3);
        doc.habits.insert("music".into(), 1);

        assert_eq!(
            summarize_context(&doc),
            "Top topics: rust, bug, tea, hello, a. Habits: code:3, music:1."
        );
    }

    #[test]
    fn empty_document_summary() {
        assert_eq!(
            summarize_context(&MemoryDocument::new()),
            "Top topics: . Habits: ."
        );
    }
}
