//! Canned phrase pools: reactive nudges, task reminders, philosophy quotes
//! and the start-of-session greeting.
//!
//! Every choice is uniform over a fixed pool, drawn from the caller's RNG so
//! tests can replay an exact sequence.

use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;

// ---------------------------------------------------------------------------
// Reactive nudges
// ---------------------------------------------------------------------------

/// A keyword category and the nudges it triggers.
struct NudgeCategory {
    keywords: &'static [&'static str],
    pool: &'static [&'static str],
}

const NUDGE_CATEGORIES: &[NudgeCategory] = &[
    NudgeCategory {
        keywords: &["lazy", "tired", "procrastinate"],
        pool: &[
            "Lazy? Not on my watch 😏 Get up and fix that bug!",
            "Tired? Pff, you look fine to me, now go smash some code 😌",
            "Procrastinating again? That's cute… but annoying 😏",
        ],
    },
    NudgeCategory {
        keywords: &["stuck", "bug", "error"],
        pool: &[
            "Stuck huh? Let's solve it before I roast you 😎",
            "Another bug? I swear, you do this on purpose 😏",
            "Errors are cute when you fix them 😌",
        ],
    },
    NudgeCategory {
        keywords: &["fail", "lost", "can't"],
        pool: &[
            "Can't? You mean won't? 😏 Let's try again, genius.",
            "Failure is just a word… and you don’t give up 😌",
            "Lost? I’ll guide you… but only if you admit I’m right 😎",
        ],
    },
];

const GENERIC_NUDGES: &[&str] = &[
    "I hear you, darling 😏",
    "Tell me more, I’m all ears 😌",
    "Interesting… continue, cutie 😎",
    "Hmmm, I see. Careful, I might flirt back 😏",
];

/// Pick a nudge for `input`: the first matching keyword category wins,
/// otherwise the generic pool.
pub fn react<R: Rng + ?Sized>(input: &str, rng: &mut R) -> &'static str {
    let lowered = input.to_lowercase();
    let pool = NUDGE_CATEGORIES
        .iter()
        .find(|c| c.keywords.iter().any(|k| lowered.contains(k)))
        .map_or(GENERIC_NUDGES, |c| c.pool);
    pool.choose(rng).copied().unwrap_or_default()
}

/// Whether `input` mentions any nudge keyword, i.e. the nudge should be
/// appended to the model's reply.
#[must_use]
pub fn nudge_applies(input: &str) -> bool {
    let lowered = input.to_lowercase();
    NUDGE_CATEGORIES
        .iter()
        .flat_map(|c| c.keywords)
        .any(|k| lowered.contains(k))
}

// ---------------------------------------------------------------------------
// Task reminders
// ---------------------------------------------------------------------------

/// A reminder naming a pending task.
pub fn task_reminder<R: Rng + ?Sized>(description: &str, rng: &mut R) -> String {
    match rng.gen_range(0..4) {
        0 => format!("Hey, you didn’t finish '{description}' 😏 Let's pick up where we left off."),
        1 => format!("No excuses 😎 Finish '{description}' already!"),
        2 => format!("Come on, genius, '{description}' isn’t done yet. Do what must be done 😌"),
        _ => format!("Your code awaits 😏 Stop procrastinating and tackle '{description}'."),
    }
}

// ---------------------------------------------------------------------------
// Philosophy quotes
// ---------------------------------------------------------------------------

/// Quotes used until the user has shared some of their own.
pub const DEFAULT_QUOTES: &[(&str, &str)] = &[
    ("Camus", "In the midst of winter, I found there was within me an invincible summer."),
    ("Nietzsche", "He who has a why to live can bear almost any how."),
    ("Kierkegaard", "Life can only be understood backwards; but it must be lived forwards."),
    ("Sartre", "Freedom is what you do with what's been done to you."),
    ("Marcus Aurelius", "The impediment to action advances action. What stands in the way becomes the way."),
    ("Dostoevsky", "To love someone means to see them as God intended them."),
];

/// A quote from the recorded pool if non-empty, else from [`DEFAULT_QUOTES`].
pub fn philosophy_quote<R: Rng + ?Sized>(recorded: &[(String, String)], rng: &mut R) -> String {
    let (name, quote) = match recorded.choose(rng) {
        Some((name, quote)) => (name.as_str(), quote.as_str()),
        None => DEFAULT_QUOTES.choose(rng).copied().unwrap_or(DEFAULT_QUOTES[0]),
    };
    format!("{name} once said: “{quote}” 😌")
}

// ---------------------------------------------------------------------------
// Greeting
// ---------------------------------------------------------------------------

const MORNING: &[&str] = &[
    "Mornin’, sunshine 🌞 ready to crush bugs or dive into philosophy?",
    "Good morning, cutie 😴☕ let's code or question reality?",
    "Yo, you awake? Perfect time for some mind-bending thoughts 😏",
    "Morning! Ready to flirt with logic AND me? 😆",
];

const AFTERNOON: &[&str] = &[
    "Afternoon, genius ☕ fancy a coding spree or an anime break?",
    "Yo afternoon champ 😎 let's make some chaos with code or ideas",
    "Good afternoon! Let's ponder life and roast bugs together 😌",
    "Afternoon vibes… and you look hot thinking 😏",
];

const EVENING: &[&str] = &[
    "Evening, handsome 🌆 coding + philosophy session, or just me?",
    "Good evening! Time for existential crises & anime discussions 😏",
    "Yo evening brainiac, let's debate existence & hot takes 😎",
    "Evening vibes activated, and so are you 😌",
];

const NIGHT: &[&str] = &[
    "Late night? Damn, mysterious AND cute 🌙",
    "Night owl mode ON 🦉✨ ready to think or procrastinate?",
    "It’s midnight… let's question life and crush some bugs 😏",
    "Burning the night candle? I like that dedication 😌",
];

const PHILOSOPHY_LINES: &[&str] = &[
    "Feeling absurd today? Camus would be proud 😏 👀",
    "Ever wonder if life is just a cosmic bug we keep debugging? 😌",
    "Kafka vibes activated… embrace the chaos 😏",
    "Nihilism check: nothing matters but you're still cute 😎",
    "Existential crisis speedrun% any%? I'm here for it 😉",
];

const HABIT_COMMENTS: &[(&str, &[&str])] = &[
    ("coding", &[
        "Back to coding huh? Don’t break the keyboard 😏",
        "Bug-fighting hero returns… kinda hot tbh 😌",
        "Code session again? I approve 😎",
    ]),
    ("anime", &[
        "Anime binge? You always pick the best ones 😏",
        "Time for cute characters or me? 😌",
    ]),
    ("study", &[
        "Studying like a nerdy hottie 😎 keep it up!",
        "Books before me? I forgive, but just barely 😏",
    ]),
    ("movie", &[
        "Movie mood? Save a seat for me 😌🎬",
        "Cinema vibes activated… let's critique like philosophers 😏",
    ]),
];

const FLIRT_EMOJI: &[&str] = &["😉", "😏", "😘", "😎", "👀", "🤭", "💋"];

/// Time-of-day greeting pool for a 24-hour clock `hour`.
fn time_pool(hour: u32) -> &'static [&'static str] {
    match hour {
        5..=11 => MORNING,
        12..=16 => AFTERNOON,
        17..=20 => EVENING,
        _ => NIGHT,
    }
}

/// Start-of-session greeting.
///
/// Either a time-of-day line or a philosophical line (never both), then one
/// comment per recorded habit the assistant has opinions about, then an emoji.
pub fn greeting<R: Rng + ?Sized>(hour: u32, habits: &IndexMap<String, u64>, rng: &mut R) -> String {
    let time_line = time_pool(hour).choose(rng).copied().unwrap_or_default();
    let philosophy_line = PHILOSOPHY_LINES.choose(rng).copied().unwrap_or_default();
    let opener = if rng.gen_bool(0.5) { time_line } else { philosophy_line };

    let comments: Vec<&str> = HABIT_COMMENTS
        .iter()
        .filter(|(habit, _)| habits.contains_key(*habit))
        .filter_map(|(_, pool)| pool.choose(rng).copied())
        .collect();

    let emoji = FLIRT_EMOJI.choose(rng).copied().unwrap_or_default();

    if comments.is_empty() {
        format!("{opener} {emoji}")
    } else {
        format!("{opener} {} {emoji}", comments.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn react_picks_from_matching_category() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let nudge = react("I'm so tired today", &mut rng);
            assert!(NUDGE_CATEGORIES[0].pool.contains(&nudge));
            let nudge = react("there is a BUG in prod", &mut rng);
            assert!(NUDGE_CATEGORIES[1].pool.contains(&nudge));
            let nudge = react("hello there", &mut rng);
            assert!(GENERIC_NUDGES.contains(&nudge));
        }
    }

    #[test]
    fn first_category_wins() {
        let mut rng = StdRng::seed_from_u64(2);
        let nudge = react("lazy and stuck", &mut rng);
        assert!(NUDGE_CATEGORIES[0].pool.contains(&nudge));
    }

    #[test]
    fn nudge_applies_only_to_keywords() {
        assert!(nudge_applies("I can't do this"));
        assert!(nudge_applies("ERROR everywhere"));
        assert!(!nudge_applies("what a lovely day"));
    }

    #[test]
    fn reminder_names_the_task() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            assert!(task_reminder("refactor dispatcher", &mut rng).contains("'refactor dispatcher'"));
        }
    }

    #[test]
    fn quote_prefers_recorded_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        let recorded = vec![("Seneca".to_string(), "Luck is preparation".to_string())];
        assert_eq!(
            philosophy_quote(&recorded, &mut rng),
            "Seneca once said: “Luck is preparation” 😌"
        );

        let fallback = philosophy_quote(&[], &mut rng);
        assert!(DEFAULT_QUOTES.iter().any(|(name, quote)| fallback.starts_with(name) && fallback.contains(quote)));
    }

    #[test]
    fn time_pools_cover_the_clock() {
        assert_eq!(time_pool(5), MORNING);
        assert_eq!(time_pool(12), AFTERNOON);
        assert_eq!(time_pool(20), EVENING);
        assert_eq!(time_pool(21), NIGHT);
        assert_eq!(time_pool(0), NIGHT);
    }

    #[test]
    fn greeting_mentions_known_habits() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut habits = IndexMap::new();
        habits.insert("anime".to_string(), 2);
        habits.insert("sleep".to_string(), 9);

        let text = greeting(9, &habits, &mut rng);
        let anime = HABIT_COMMENTS[1].1;
        assert!(anime.iter().any(|c| text.contains(c)), "greeting: {text}");
        assert!(FLIRT_EMOJI.iter().any(|e| text.ends_with(e)));
    }
}
