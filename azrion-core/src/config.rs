//! Configuration for the Azrion assistant.
//!
//! Maps directly to `azrion.toml`. Every field has a default, so a partial
//! file (or no file at all) always yields a complete configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level Azrion configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzrionConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory document location and limits.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Language model connection settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Command dispatcher programs and limits.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    /// Persona prompt and reply decoration.
    #[serde(default)]
    pub persona: PersonaConfig,
    /// Console presentation settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl AzrionConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AzrionError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| crate::AzrionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the assistant cannot act on.
    ///
    /// # Errors
    /// Returns [`crate::AzrionError::Config`] naming the offending key.
    pub fn validate(&self) -> crate::error::Result<()> {
        let p = self.persona.quote_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(crate::AzrionError::Config(format!(
                "persona.quote_probability must be within 0.0..=1.0, got {p}"
            )));
        }
        if let Some(t) = self.llm.temperature.filter(|t| !t.is_finite()) {
            return Err(crate::AzrionError::Config(format!(
                "llm.temperature must be finite, got {t}"
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Name used in the console banner.
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Name the assistant prints before console replies.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            assistant_name: default_assistant_name(),
            log_level: default_log_level(),
        }
    }
}

/// Memory document location and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Path of the JSON memory document.
    #[serde(default = "default_memory_path")]
    pub path: PathBuf,
    /// Number of recent messages kept in short-term history.
    #[serde(default = "default_12")]
    pub short_term_limit: usize,
    /// Results returned by the in-conversation `search history:` directive.
    #[serde(default = "default_6")]
    pub history_search_limit: usize,
    /// Results listed by the console `search history:` command.
    #[serde(default = "default_8")]
    pub console_search_limit: usize,
    /// Write to a temporary file and rename it over the document.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: default_memory_path(),
            short_term_limit: 12,
            history_search_limit: 6,
            console_search_limit: 8,
            atomic_writes: true,
        }
    }
}

/// Language model connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "ollama", "openai", "none".
    #[serde(default = "default_ollama")]
    pub provider: String,
    /// Base URL for the LLM API.
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for OpenAI-compatible providers.
    #[serde(default)]
    pub api_key: String,
    /// Hard timeout for a single model call in milliseconds.
    #[serde(default = "default_120000")]
    pub request_timeout_ms: u64,
    /// Extra attempts after a failed call.
    #[serde(default = "default_1")]
    pub max_retries: u32,
    /// Sampling temperature; the provider default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_ollama(),
            base_url: default_ollama_url(),
            model: default_model(),
            api_key: String::new(),
            request_timeout_ms: 120_000,
            max_retries: 1,
            temperature: None,
        }
    }
}

/// Programs and limits used by the command dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Base directory for file commands; the user's home when unset.
    #[serde(default)]
    pub home: Option<PathBuf>,
    /// Timeout for captured commands in milliseconds.
    #[serde(default = "default_30000")]
    pub command_timeout_ms: u64,
    /// Program launched by "open browser".
    #[serde(default = "default_browser")]
    pub browser: String,
    /// Program used to open websites and searches.
    #[serde(default = "default_web_browser")]
    pub web_browser: String,
    /// Arguments passed to `web_browser` before the URL.
    #[serde(default = "default_web_browser_args")]
    pub web_browser_args: Vec<String>,
    /// Program launched by "open code".
    #[serde(default = "default_editor")]
    pub editor: String,
    /// Program launched by "open files".
    #[serde(default = "default_file_manager")]
    pub file_manager: String,
    /// Generic desktop opener for folders.
    #[serde(default = "default_opener")]
    pub opener: String,
    /// Media transport controller.
    #[serde(default = "default_media_controller")]
    pub media_controller: String,
    /// Filename search tool.
    #[serde(default = "default_file_finder")]
    pub file_finder: String,
    /// Shell used for `run:` and system probes.
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            home: None,
            command_timeout_ms: 30_000,
            browser: default_browser(),
            web_browser: default_web_browser(),
            web_browser_args: default_web_browser_args(),
            editor: default_editor(),
            file_manager: default_file_manager(),
            opener: default_opener(),
            media_controller: default_media_controller(),
            file_finder: default_file_finder(),
            shell: default_shell(),
        }
    }
}

/// Persona prompt and reply decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// System prompt sent first with every model call; the built-in persona when unset.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Probability that a reply gains a philosophy quote.
    #[serde(default = "default_quote_probability")]
    pub quote_probability: f64,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            quote_probability: default_quote_probability(),
        }
    }
}

/// Console presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Whether replies are printed with the typing animation.
    #[serde(default = "default_true")]
    pub typing: bool,
    /// Delay per character in milliseconds.
    #[serde(default = "default_5")]
    pub type_delay_ms: u64,
    /// Pause after each reply in milliseconds.
    #[serde(default = "default_150")]
    pub reply_pause_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            typing: true,
            type_delay_ms: 5,
            reply_pause_ms: 150,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_user_name() -> String { "Triquetrus".to_string() }
fn default_assistant_name() -> String { "Azrion".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_memory_path() -> PathBuf { PathBuf::from("azrion_memory.json") }
fn default_ollama() -> String { "ollama".to_string() }
fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "llama3.1:latest".to_string() }
fn default_browser() -> String { "firefox".to_string() }
fn default_web_browser() -> String { "firedragon".to_string() }
fn default_web_browser_args() -> Vec<String> { vec!["--new-window".to_string()] }
fn default_editor() -> String { "code".to_string() }
fn default_file_manager() -> String { "dolphin".to_string() }
fn default_opener() -> String { "xdg-open".to_string() }
fn default_media_controller() -> String { "playerctl".to_string() }
fn default_file_finder() -> String { "fd".to_string() }
fn default_shell() -> String { "bash".to_string() }
fn default_quote_probability() -> f64 { 0.02 }
fn default_1() -> u32 { 1 }
fn default_5() -> u64 { 5 }
fn default_6() -> usize { 6 }
fn default_8() -> usize { 8 }
fn default_12() -> usize { 12 }
fn default_150() -> u64 { 150 }
fn default_30000() -> u64 { 30_000 }
fn default_120000() -> u64 { 120_000 }
