//! The Conversation Orchestrator: one call to [`Assistant::process`] is one
//! full turn.
//!
//! A turn records the user message, updates the trackers, then either
//! short-circuits through the command dispatcher, answers a
//! `search history:` directive locally, or asks the model. Every path ends
//! with the document persisted. Nothing here returns an error: storage and
//! model failures are logged and degraded.

use std::sync::Arc;

use chrono::{Local, Timelike};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use azrion_core::dispatch::Dispatcher;
use azrion_core::dispatch::rules::strip_prefix_ignore_case;
use azrion_core::search::{NO_MATCHES, search_archive};
use azrion_core::summary::summarize_context;
use azrion_core::{AzrionConfig, MemoryDocument, MemoryStore, Message, Role, phrases, tasks, trackers};
use azrion_llm::prompt;
use azrion_llm::{ChatMessage, ChatModel, ChatRequest};

/// Reserved prefix for a local archive search.
pub const SEARCH_DIRECTIVE: &str = "search history:";

/// Tunables for the orchestrator, taken from [`AzrionConfig`].
#[derive(Debug, Clone)]
pub struct ConversationSettings {
    /// Short-term history window.
    pub short_term_limit: usize,
    /// Results returned for a `search history:` directive.
    pub history_search_limit: usize,
    /// Chance of appending a philosophy quote to a model reply.
    pub quote_probability: f64,
    /// Rendered persona system prompt.
    pub persona: String,
    /// Model name.
    pub model: String,
    /// Model request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl ConversationSettings {
    /// Derive settings from the full configuration.
    #[must_use]
    pub fn from_config(config: &AzrionConfig) -> Self {
        Self {
            short_term_limit: config.memory.short_term_limit,
            history_search_limit: config.memory.history_search_limit,
            quote_probability: config.persona.quote_probability,
            persona: prompt::persona(config.persona.system_prompt.as_deref(), &config.general.assistant_name),
            model: config.llm.model.clone(),
            request_timeout_ms: config.llm.request_timeout_ms,
            temperature: config.llm.temperature,
        }
    }
}

/// Owns the memory document and drives every turn.
pub struct Assistant {
    doc: MemoryDocument,
    store: MemoryStore,
    dispatcher: Dispatcher,
    model: Arc<dyn ChatModel>,
    rng: StdRng,
    settings: ConversationSettings,
}

impl Assistant {
    /// Create an assistant, loading the document from `store`.
    #[must_use]
    pub fn new(
        settings: ConversationSettings,
        store: MemoryStore,
        dispatcher: Dispatcher,
        model: Arc<dyn ChatModel>,
        rng: StdRng,
    ) -> Self {
        let doc = store.load();
        Self {
            doc,
            store,
            dispatcher,
            model,
            rng,
            settings,
        }
    }

    /// The current memory document.
    #[must_use]
    pub fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    /// Process one user input and return the reply text.
    pub async fn process(&mut self, input: &str) -> String {
        let limit = self.settings.short_term_limit;
        self.doc.record(Message::user(input), limit);

        trackers::update_stats(input, &mut self.doc);
        trackers::track_habits(input, &mut self.doc);
        trackers::track_philosophy(input, &mut self.doc, &mut self.rng);

        let nudge = self.nudge(input);

        if let Some(reply) = self.dispatcher.dispatch(input).await {
            self.doc.record(Message::assistant(reply.clone()), limit);
            self.persist();
            return reply;
        }

        if let Some(query) = strip_prefix_ignore_case(input.trim(), SEARCH_DIRECTIVE) {
            let reply = self.search_directive(query);
            self.persist();
            return reply;
        }

        let reply = match self.ask_model().await {
            Ok(text) => text,
            Err(reason) => {
                warn!(error = %reason, "Model call failed, using fallback reply");
                format!("Sorry, I couldn't reach my brain just now 😅 ({reason})")
            }
        };
        let reply = augment_reply(
            &reply,
            input,
            &nudge,
            &self.doc.philosophy.favorite_quotes,
            self.settings.quote_probability,
            &mut self.rng,
        );

        self.doc.record(Message::assistant(reply.clone()), limit);
        self.persist();
        reply
    }

    /// Add a pending task and persist.
    pub fn add_task(&mut self, description: &str) {
        tasks::add_task(&mut self.doc, description);
        self.persist();
    }

    /// Complete matching tasks and persist. Returns how many changed.
    pub fn complete_task(&mut self, fragment: &str) -> usize {
        let completed = tasks::complete_tasks(&mut self.doc, fragment);
        debug!(fragment, completed, "Completed tasks");
        self.persist();
        completed
    }

    /// Search the whole archive without recording anything.
    #[must_use]
    pub fn search_history(&self, query: &str, limit: usize) -> Vec<String> {
        search_archive(&self.doc.full_history, query, limit)
    }

    /// Start-of-session greeting for the current local hour.
    pub fn greeting(&mut self) -> String {
        phrases::greeting(Local::now().hour(), &self.doc.habits, &mut self.rng)
    }

    /// Reactive nudge plus, when tasks are pending, a reminder.
    fn nudge(&mut self, input: &str) -> String {
        let mut nudge = phrases::react(input, &mut self.rng).to_string();
        let pending = tasks::pick_pending(&self.doc.tasks, &mut self.rng).map(|t| t.description.clone());
        if let Some(description) = pending {
            nudge.push(' ');
            nudge.push_str(&phrases::task_reminder(&description, &mut self.rng));
        }
        nudge
    }

    /// Answer a search directive from the archive, excluding the directive
    /// message itself. No assistant message is recorded.
    fn search_directive(&self, query: &str) -> String {
        let archive = &self.doc.full_history;
        let earlier = &archive[..archive.len().saturating_sub(1)];
        let hits = search_archive(earlier, query, self.settings.history_search_limit);
        if hits.is_empty() {
            NO_MATCHES.to_string()
        } else {
            hits.join("\n")
        }
    }

    async fn ask_model(&self) -> Result<String, azrion_llm::LlmError> {
        let history = self.doc.history.iter().map(|m| match m.role {
            Role::User => ChatMessage::user(m.content.clone()),
            Role::Assistant => ChatMessage::assistant(m.content.clone()),
        });
        let messages = prompt::build_messages(&self.settings.persona, &summarize_context(&self.doc), history);
        let request = ChatRequest::new(self.settings.model.clone(), messages)
            .with_temperature(self.settings.temperature)
            .with_timeout(self.settings.request_timeout_ms);

        let response = self.model.chat(&request).await?;
        debug!(model = %response.model, latency_ms = response.latency_ms, "Model replied");
        Ok(response.text)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.doc) {
            warn!(path = %self.store.path().display(), error = %e, "Could not save memory");
        }
    }
}

/// Decorate a model reply.
///
/// The nudge is appended as a new paragraph only when `input` contains a
/// nudge keyword. Independently, with probability `quote_probability`, a
/// philosophy quote is appended as a new paragraph. A NaN probability never
/// adds a quote.
pub fn augment_reply<R: Rng + ?Sized>(
    reply: &str,
    input: &str,
    nudge: &str,
    quotes: &[(String, String)],
    quote_probability: f64,
    rng: &mut R,
) -> String {
    let mut text = reply.to_string();
    if !nudge.trim().is_empty() && phrases::nudge_applies(input) {
        append_paragraph(&mut text, nudge);
    }
    let p = if quote_probability.is_nan() { 0.0 } else { quote_probability.clamp(0.0, 1.0) };
    if rng.gen_bool(p) {
        append_paragraph(&mut text, &phrases::philosophy_quote(quotes, rng));
    }
    text
}

fn append_paragraph(text: &mut String, extra: &str) {
    let trimmed = text.trim();
    *text = if trimmed.is_empty() {
        extra.to_string()
    } else {
        format!("{trimmed}\n\n{extra}")
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn nudge_only_for_keyword_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(augment_reply("Sure.", "hello", "NUDGE", &[], 0.0, &mut rng), "Sure.");
        assert_eq!(
            augment_reply("  Sure.  ", "I'm so tired", "NUDGE", &[], 0.0, &mut rng),
            "Sure.\n\nNUDGE"
        );
        assert_eq!(augment_reply("   ", "stuck again", "NUDGE", &[], 0.0, &mut rng), "NUDGE");
    }

    #[test]
    fn certain_quote_uses_recorded_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let quotes = vec![("Seneca".to_string(), "Luck is preparation".to_string())];
        assert_eq!(
            augment_reply("Ok", "hello", "", &quotes, 1.0, &mut rng),
            "Ok\n\nSeneca once said: “Luck is preparation” 😌"
        );
    }

    #[test]
    fn unusable_quote_probability_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            let text = augment_reply("Ok", "hello", "", &[], p, &mut rng);
            assert!(text.starts_with("Ok"), "{p}");
        }
        assert_eq!(augment_reply("Ok", "hello", "", &[], f64::NAN, &mut rng), "Ok");
    }

    #[test]
    fn settings_render_persona_name() {
        let mut config = AzrionConfig::default();
        config.general.assistant_name = "Nyx".into();
        let settings = ConversationSettings::from_config(&config);
        assert!(settings.persona.starts_with("You are Nyx:"));
        assert_eq!(settings.short_term_limit, 12);
        assert_eq!(settings.history_search_limit, 6);
    }
}
