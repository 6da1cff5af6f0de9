//! Console presentation adapter: the `>>>` prompt loop.
//!
//! Task commands, history listing and exit are handled here; everything
//! else is a chat turn for the [`Assistant`]. Replies to chat turns are
//! printed with a per-character typing animation.

use std::io::{self, Write};
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use azrion_core::config::{ConsoleConfig, GeneralConfig};
use azrion_core::dispatch::rules::strip_prefix_ignore_case;
use azrion_core::search::NO_MATCHES;

use crate::conversation::{Assistant, SEARCH_DIRECTIVE};

/// One line of console input, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand<'a> {
    /// `add task <description>`
    AddTask(&'a str),
    /// `done <fragment>`
    Done(&'a str),
    /// `search history:<query>`
    SearchHistory(&'a str),
    /// `exit` or `bye`
    Exit,
    /// Blank line.
    Empty,
    /// Anything else.
    Chat(&'a str),
}

impl<'a> ConsoleCommand<'a> {
    /// Classify a raw input line. Command words are case-insensitive.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleCommand::Empty;
        }
        if let Some(description) = strip_prefix_ignore_case(line, "add task ") {
            return ConsoleCommand::AddTask(description);
        }
        if let Some(fragment) = strip_prefix_ignore_case(line, "done ") {
            return ConsoleCommand::Done(fragment);
        }
        if let Some(query) = strip_prefix_ignore_case(line, SEARCH_DIRECTIVE) {
            return ConsoleCommand::SearchHistory(query);
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("bye") {
            return ConsoleCommand::Exit;
        }
        ConsoleCommand::Chat(line)
    }
}

/// Presentation settings for the loop.
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    /// Name in the banner.
    pub user_name: String,
    /// Name prefixed to console confirmations.
    pub assistant_name: String,
    /// Whether chat replies are typed out.
    pub typing: bool,
    /// Delay per typed character.
    pub type_delay: Duration,
    /// Pause after each chat reply.
    pub reply_pause: Duration,
    /// Maximum hits listed by `search history:`.
    pub search_limit: usize,
}

impl ConsoleSettings {
    /// Build from the `[general]` and `[console]` sections.
    #[must_use]
    pub fn new(general: &GeneralConfig, console: &ConsoleConfig, search_limit: usize) -> Self {
        Self {
            user_name: general.user_name.clone(),
            assistant_name: general.assistant_name.clone(),
            typing: console.typing,
            type_delay: Duration::from_millis(console.type_delay_ms),
            reply_pause: Duration::from_millis(console.reply_pause_ms),
            search_limit,
        }
    }
}

/// Print `text` one character at a time, then a newline.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub async fn type_out<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    writeln!(out)?;
    out.flush()
}

/// Run the prompt loop until `exit`/`bye` or end of input.
///
/// # Errors
///
/// Returns I/O errors from reading `input` or writing `out`.
pub async fn run<R, W>(assistant: &mut Assistant, settings: &ConsoleSettings, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let name = &settings.assistant_name;
    writeln!(out, "Hey {}!", settings.user_name)?;
    writeln!(out, "{}", assistant.greeting())?;

    let mut lines = input.lines();
    loop {
        write!(out, ">>> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Empty => {}
            ConsoleCommand::AddTask(description) => {
                assistant.add_task(description);
                writeln!(out, "{name}: Got it! Task added 😉")?;
            }
            ConsoleCommand::Done(fragment) => {
                assistant.complete_task(fragment);
                writeln!(out, "{name}: Nice! Task marked as done 😏")?;
            }
            ConsoleCommand::SearchHistory(query) => {
                let hits = assistant.search_history(query, settings.search_limit);
                if hits.is_empty() {
                    writeln!(out, "{name}: {NO_MATCHES}")?;
                } else {
                    writeln!(out, "{name}: Found these matches:")?;
                    for hit in hits {
                        writeln!(out, " - {hit}")?;
                    }
                }
            }
            ConsoleCommand::Exit => {
                writeln!(out, "{name}: Bye! Talk to you later 😉")?;
                break;
            }
            ConsoleCommand::Chat(text) => {
                let reply = assistant.process(text).await;
                if settings.typing {
                    type_out(out, &reply, settings.type_delay).await?;
                } else {
                    writeln!(out, "{reply}")?;
                }
                if !settings.reply_pause.is_zero() {
                    tokio::time::sleep(settings.reply_pause).await;
                }
            }
        }
    }
    Ok(())
}
