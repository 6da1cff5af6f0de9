//! Natural-language command dispatch.
//!
//! [`Dispatcher::dispatch`] walks the [`rules::RULES`] table in priority
//! order. The first rule whose handler produces a reply wins; a handler may
//! decline (empty `open:` URL, empty `open folder` path), in which case the
//! scan continues and, if nothing else matches, the input falls through to
//! the language model.
//!
//! External programs are started through a [`CommandRunner`]; filesystem
//! actions are performed directly. No action returns an error: every
//! failure is rendered into the reply.

pub mod files;
pub mod rules;
pub mod runner;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::DispatcherConfig;

pub use files::{EntryKind, Target};
pub use rules::{Action, App, Matcher, Media, Probe, Rule, SearchEngine, Site, resolve};
pub use runner::{CommandOutcome, CommandRunner, SystemRunner};

/// Executes dispatcher rules against the host.
pub struct Dispatcher {
    config: DispatcherConfig,
    home: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("home", &self.home)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher with an explicit runner.
    ///
    /// The home directory is taken from the config, else the user's home,
    /// else the current directory.
    #[must_use]
    pub fn new(config: DispatcherConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let home = config
            .home
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { config, home, runner }
    }

    /// Create a dispatcher that runs programs on the host.
    #[must_use]
    pub fn from_config(config: DispatcherConfig) -> Self {
        let timeout = Duration::from_millis(config.command_timeout_ms);
        Self::new(config, Arc::new(SystemRunner::new(timeout)))
    }

    /// Directory relative paths are resolved against.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Run the first applicable rule and return its reply, or `None` when
    /// the input is not a command.
    pub async fn dispatch(&self, input: &str) -> Option<String> {
        for (rule, arg) in rules::candidates(input) {
            if let Some(reply) = self.execute(rule.action, arg).await {
                info!(rule = rule.name, "Dispatched command");
                return Some(reply);
            }
            debug!(rule = rule.name, "Rule declined, continuing");
        }
        None
    }

    /// Perform one action. `arg` is the untrimmed remainder for prefix rules.
    async fn execute(&self, action: Action, arg: &str) -> Option<String> {
        let arg = arg.trim();
        let reply = match action {
            Action::Launch(app) => self.launch_app(app).await,
            Action::OpenSite(site) => {
                self.open_in_web_browser(site.url()).await;
                match site {
                    Site::YouTube => "Opening YouTube 👀",
                    Site::Google => "Opening Google for you 😌",
                    Site::GitHub => "Opening GitHub 😎",
                }
                .to_string()
            }
            Action::OpenUrl => {
                if arg.is_empty() {
                    return None;
                }
                self.open_in_web_browser(arg).await;
                format!("Opening {arg} 🔥")
            }
            Action::WebSearch(engine) => self.web_search(engine, arg).await,
            Action::Media(media) => self.media(media).await,
            Action::SystemInfo(probe) => {
                let out = self.shell(probe.script()).await;
                format!("{}{}", probe.preamble(), out.text())
            }
            Action::CreateFolder => files::create_folder(&self.target(arg)?),
            Action::CreateFile => files::create_file(&self.target(arg)?),
            Action::ListFiles => files::list_files(&self.home.join(arg)),
            Action::OpenFolder => {
                if arg.is_empty() {
                    return None;
                }
                let dir = self.home.join(arg);
                let shown = dir.display().to_string();
                self.runner.launch(&self.config.opener, &[shown.clone()]).await;
                format!("Opening folder '{shown}' 😌")
            }
            Action::SearchFiles => {
                if arg.is_empty() {
                    return Some("Tell me what filename or pattern to search for.".to_string());
                }
                let args = vec![arg.to_string(), self.home.display().to_string()];
                let outcome = self.runner.run(&self.config.file_finder, &args).await;
                files::format_search(arg, &outcome)
            }
            Action::DeleteFile => {
                let target = self.target(arg)?;
                files::delete(EntryKind::File, &target, &self.home, self.runner.as_ref()).await
            }
            Action::DeleteFolder => {
                let target = self.target(arg)?;
                files::delete(EntryKind::Folder, &target, &self.home, self.runner.as_ref()).await
            }
            Action::RawCommand => {
                if arg.is_empty() {
                    return Some("You need to give me a command after 'run:'.".to_string());
                }
                format!("Command output:\n{}", self.shell(arg).await.text())
            }
        };
        Some(reply)
    }

    /// Parse a `<name> [in <dir>]` argument. An empty name declines the
    /// rule, so the home directory itself is never a target.
    fn target(&self, arg: &str) -> Option<Target> {
        let target = Target::parse(arg, &self.home);
        (!target.name.is_empty()).then_some(target)
    }

    async fn launch_app(&self, app: App) -> String {
        let (program, reply) = match app {
            App::Browser => (&self.config.browser, "Opening your browser 🔥"),
            App::Editor => (&self.config.editor, "Launching VS Code 😎"),
            App::FileManager => (&self.config.file_manager, "Opening your file manager 😌"),
        };
        self.runner.launch(program, &[]).await;
        reply.to_string()
    }

    async fn open_in_web_browser(&self, url: &str) {
        let mut args = self.config.web_browser_args.clone();
        args.push(url.to_string());
        self.runner.launch(&self.config.web_browser, &args).await;
    }

    async fn web_search(&self, engine: SearchEngine, query: &str) -> String {
        if query.is_empty() {
            return format!("What do you want me to search on {}?", engine.name());
        }
        self.open_in_web_browser(&engine.search_url(query)).await;
        match engine {
            SearchEngine::Google => format!("Searching Google for \"{query}\" 🔍"),
            SearchEngine::YouTube => format!("Searching YouTube for \"{query}\" 🎵"),
        }
    }

    async fn media(&self, media: Media) -> String {
        self.runner
            .run(&self.config.media_controller, &[media.verb().to_string()])
            .await;
        match media {
            Media::Play => "Playing your music 🎵",
            Media::Pause => "Pausing your music 😌",
            Media::Next => "Skipping to the next track 😎",
            Media::Previous => "Going back to the previous track 👀",
        }
        .to_string()
    }

    async fn shell(&self, script: &str) -> CommandOutcome {
        let args = vec!["-lc".to_string(), script.to_string()];
        self.runner.run(&self.config.shell, &args).await
    }
}
