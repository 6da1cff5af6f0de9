//! Signal trackers: fold one user input into the document's counters.
//!
//! All trackers accept any string, never fail, and only ever add to the
//! document: counts grow, lists gain entries, nothing is removed.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::memory::MemoryDocument;

/// Keywords counted as habits, at most once per input.
pub const HABIT_KEYWORDS: &[&str] = &[
    "study", "work", "sleep", "music", "exercise", "code", "coding", "anime", "movie",
];

/// Philosophy schools recognised in input, including adjectival forms.
pub const SCHOOLS: &[&str] = &[
    "existentialism",
    "absurdism",
    "nihilism",
    "stoicism",
    "stoic",
    "existentialist",
    "absurdist",
    "nihilist",
];

/// Philosophers recognised in input.
pub const PHILOSOPHERS: &[&str] = &[
    "camus",
    "nietzsche",
    "kierkegaard",
    "sartre",
    "dostoevsky",
    "epictetus",
    "seneca",
    "marcus aurelius",
    "plato",
    "aristotle",
];

/// Opening curly double quote.
pub const QUOTE_OPEN: char = '\u{201C}';
/// Closing curly double quote.
pub const QUOTE_CLOSE: char = '\u{201D}';

/// Count every purely alphabetic whitespace-separated token, lowercased.
///
/// Tokens containing digits or punctuation are ignored, so `"fix!"` does
/// not count while `"Fix"` counts as `"fix"`.
pub fn update_stats(input: &str, doc: &mut MemoryDocument) {
    for token in input.split_whitespace() {
        if token.chars().all(char::is_alphabetic) {
            *doc.stats.entry(token.to_lowercase()).or_insert(0) += 1;
        }
    }
}

/// Increment each habit keyword found as a substring, once per call.
pub fn track_habits(input: &str, doc: &mut MemoryDocument) {
    let lowered = input.to_lowercase();
    for keyword in HABIT_KEYWORDS {
        if lowered.contains(keyword) {
            *doc.habits.entry((*keyword).to_string()).or_insert(0) += 1;
        }
    }
}

/// Record newly mentioned schools and philosophers, and capture a quote.
///
/// A quote is the text strictly between the first opening curly quote and
/// the first closing curly quote after it. It is stored with a randomly
/// chosen philosopher as attribution. Input without a complete pair is
/// simply not a quote.
pub fn track_philosophy<R: Rng + ?Sized>(input: &str, doc: &mut MemoryDocument, rng: &mut R) {
    let lowered = input.to_lowercase();
    let philosophy = &mut doc.philosophy;

    for school in SCHOOLS {
        if lowered.contains(school) && !philosophy.liked_schools.iter().any(|s| s == school) {
            philosophy.liked_schools.push((*school).to_string());
        }
    }
    for name in PHILOSOPHERS {
        if lowered.contains(name) && !philosophy.favorite_philosophers.iter().any(|p| p == name) {
            philosophy.favorite_philosophers.push((*name).to_string());
        }
    }

    if let Some(quote) = extract_quote(input) {
        if let Some(name) = PHILOSOPHERS.choose(rng) {
            philosophy
                .favorite_quotes
                .push((title_case(name), quote.to_string()));
        }
    }
}

/// Text strictly between the first `“` and the next `”`.
#[must_use]
pub fn extract_quote(input: &str) -> Option<&str> {
    let start = input.find(QUOTE_OPEN)? + QUOTE_OPEN.len_utf8();
    let rest = &input[start..];
    let end = rest.find(QUOTE_CLOSE)?;
    Some(&rest[..end])
}

/// `"marcus aurelius"` -> `"Marcus Aurelius"`.
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
