//! Subprocess boundary for dispatcher actions.
//!
//! Every external program goes through a [`CommandRunner`], so the
//! dispatcher can be exercised in tests without touching the host. Captured
//! output is surfaced as text only; exit codes are not distinguished.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Result of running or launching an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The program ran; combined stdout and stderr, trimmed.
    Output(String),
    /// The program is not installed.
    NotFound {
        /// Program name as requested.
        program: String,
    },
    /// The program could not be started or waited on.
    Failed(String),
    /// The program did not finish in time and was killed.
    TimedOut(Duration),
}

impl CommandOutcome {
    /// User-facing rendering of the outcome.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            CommandOutcome::Output(out) if out.is_empty() => "Command executed.".to_string(),
            CommandOutcome::Output(out) => out.clone(),
            CommandOutcome::NotFound { program } => {
                format!("Command failed: {program}: command not found")
            }
            CommandOutcome::Failed(reason) => format!("Command failed: {reason}"),
            CommandOutcome::TimedOut(after) => {
                format!("Command failed: timed out after {}s", after.as_secs())
            }
        }
    }

    /// Whether the program (or one it shelled out to) is missing.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            CommandOutcome::NotFound { .. } => true,
            CommandOutcome::Output(out) => out.to_lowercase().contains("command not found"),
            _ => false,
        }
    }
}

/// Runs external programs on behalf of the dispatcher.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` to completion and capture its output.
    async fn run(&self, program: &str, args: &[String]) -> CommandOutcome;

    /// Start a GUI program without waiting for it to exit.
    async fn launch(&self, program: &str, args: &[String]) -> CommandOutcome;
}

/// Runs programs on the host with a bounded wait.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner that kills programs still running after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn spawn_error(program: &str, e: &std::io::Error) -> CommandOutcome {
    if e.kind() == std::io::ErrorKind::NotFound {
        CommandOutcome::NotFound {
            program: program.to_string(),
        }
    } else {
        CommandOutcome::Failed(format!("{program}: {e}"))
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> CommandOutcome {
        debug!(program, ?args, "Running command");
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(e) => return spawn_error(program, &e),
        };

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(out)) => {
                let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                CommandOutcome::Output(text.trim().to_string())
            }
            Ok(Err(e)) => CommandOutcome::Failed(format!("{program}: {e}")),
            Err(_) => {
                // Dropping the future drops the child, which kills it.
                warn!(program, timeout_s = self.timeout.as_secs(), "Command timed out");
                CommandOutcome::TimedOut(self.timeout)
            }
        }
    }

    async fn launch(&self, program: &str, args: &[String]) -> CommandOutcome {
        debug!(program, ?args, "Launching program");
        let spawned = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                // Reap in the background so the launched program never lingers as a zombie.
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
                CommandOutcome::Output(String::new())
            }
            Err(e) => {
                warn!(program, error = %e, "Launch failed");
                spawn_error(program, &e)
            }
        }
    }
}
