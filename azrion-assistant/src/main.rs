//! `azrion`: the console assistant.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use azrion_assistant::console::{self, ConsoleSettings};
use azrion_assistant::conversation::{Assistant, ConversationSettings};
use azrion_core::dispatch::Dispatcher;
use azrion_core::{AzrionConfig, MemoryStore};
use azrion_llm::{LlmClient, LlmProvider};

/// Chat assistant with persistent memory and natural-language system commands.
#[derive(Debug, Parser)]
#[command(name = "azrion", version, about)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist.
    #[arg(short, long, env = "AZRION_CONFIG", default_value = "azrion.toml")]
    config: PathBuf,

    /// Memory document path.
    #[arg(long)]
    memory: Option<PathBuf>,

    /// Model name, e.g. `llama3.1:latest`.
    #[arg(long)]
    model: Option<String>,

    /// Model server URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Print replies at once instead of typing them out.
    #[arg(long)]
    no_typing: bool,

    /// Seed for phrase selection, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(cli: &Cli) -> Result<AzrionConfig> {
    let mut config = if cli.config.exists() {
        AzrionConfig::from_file(&cli.config)
            .with_context(|| format!("invalid config file {}", cli.config.display()))?
    } else {
        AzrionConfig::default()
    };

    if let Some(path) = &cli.memory {
        config.memory.path.clone_from(path);
    }
    if let Some(model) = &cli.model {
        config.llm.model.clone_from(model);
    }
    if let Some(url) = &cli.base_url {
        config.llm.base_url.clone_from(url);
    }
    if cli.no_typing {
        config.console.typing = false;
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.general.log_level);

    let provider = LlmProvider::from_name(&config.llm.provider, &config.llm.base_url, &config.llm.api_key)
        .context("invalid [llm] provider")?;
    let model = Arc::new(LlmClient::new(provider, config.llm.max_retries));
    if !model.is_available() {
        warn!("No model provider configured; chat replies will fall back to an apology");
    }

    let rng = cli.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let store = MemoryStore::from_config(&config.memory);
    let dispatcher = Dispatcher::from_config(config.dispatcher.clone());
    info!(
        memory = %store.path().display(),
        model = %config.llm.model,
        home = %dispatcher.home().display(),
        "Starting Azrion"
    );

    let mut assistant = Assistant::new(ConversationSettings::from_config(&config), store, dispatcher, model, rng);
    let settings = ConsoleSettings::new(&config.general, &config.console, config.memory.console_search_limit);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    console::run(&mut assistant, &settings, stdin, &mut stdout)
        .await
        .context("console I/O failed")
}
