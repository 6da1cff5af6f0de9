//! Shared fixtures: a counting chat model and a silent command runner.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;

use azrion_assistant::conversation::{Assistant, ConversationSettings};
use azrion_core::config::DispatcherConfig;
use azrion_core::dispatch::{CommandOutcome, CommandRunner, Dispatcher};
use azrion_core::{AzrionConfig, MemoryStore};
use azrion_llm::{ChatModel, ChatRequest, ChatResponse, LlmError};

/// Replies with a fixed text (or fails) and remembers every request.
pub struct MockModel {
    reply: Option<String>,
    calls: AtomicUsize,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        match &self.reply {
            Some(text) => Ok(ChatResponse {
                text: text.clone(),
                model: request.model.clone(),
                latency_ms: 1,
            }),
            None => Err(LlmError::Unavailable("mock offline".into())),
        }
    }
}

/// Pretends every program ran and printed nothing.
#[derive(Default)]
pub struct SilentRunner {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandRunner for SilentRunner {
    async fn run(&self, program: &str, _args: &[String]) -> CommandOutcome {
        self.calls.lock().push(program.to_string());
        CommandOutcome::Output(String::new())
    }

    async fn launch(&self, program: &str, _args: &[String]) -> CommandOutcome {
        self.calls.lock().push(program.to_string());
        CommandOutcome::Output(String::new())
    }
}

/// Default settings with quotes disabled so replies are predictable.
pub fn quiet_settings() -> ConversationSettings {
    let mut settings = ConversationSettings::from_config(&AzrionConfig::default());
    settings.quote_probability = 0.0;
    settings
}

/// An assistant whose memory file and home directory live under `root`.
pub fn assistant(root: &Path, model: Arc<MockModel>, settings: ConversationSettings) -> (Assistant, Arc<SilentRunner>) {
    let runner = Arc::new(SilentRunner::default());
    let dispatcher = Dispatcher::new(
        DispatcherConfig {
            home: Some(root.join("home")),
            ..DispatcherConfig::default()
        },
        runner.clone(),
    );
    let store = MemoryStore::new(root.join("azrion_memory.json"), true);
    let assistant = Assistant::new(settings, store, dispatcher, model, StdRng::seed_from_u64(42));
    (assistant, runner)
}
