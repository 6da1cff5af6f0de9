//! The dispatcher rule table.
//!
//! Rules are evaluated top to bottom against the trimmed input; order is
//! significant because several phrasings overlap (`"open: youtube.com"`
//! mentions both "open" and "youtube", `"open folder"` starts like
//! `"open:"`). Resolution is pure, so the table can be audited and tested
//! without touching the host.

/// How a rule recognises input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Any of the phrases occurs in the lowercased input.
    AnyOf(&'static [&'static str]),
    /// Every one of the words occurs in the lowercased input.
    AllOf(&'static [&'static str]),
    /// The input starts with the phrase (ASCII case-insensitive); the rest
    /// of the original input becomes the argument.
    Prefix(&'static str),
}

impl Matcher {
    /// Try the matcher. `trimmed` is the user's input without surrounding
    /// whitespace and `lowered` its lowercase form.
    ///
    /// Returns the argument on success: the remainder after a prefix, or an
    /// empty string for substring matchers.
    #[must_use]
    pub fn matches<'a>(&self, trimmed: &'a str, lowered: &str) -> Option<&'a str> {
        match self {
            Matcher::AnyOf(phrases) => phrases.iter().any(|p| lowered.contains(p)).then_some(""),
            Matcher::AllOf(words) => words.iter().all(|w| lowered.contains(w)).then_some(""),
            // A bare prefix ("search google for") still matches, with no argument.
            Matcher::Prefix(prefix) => strip_prefix_ignore_case(trimmed, prefix)
                .or_else(|| trimmed.eq_ignore_ascii_case(prefix.trim_end()).then_some("")),
        }
    }
}

/// `input` without `prefix`, comparing the prefix ASCII case-insensitively.
#[must_use]
pub fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &input[prefix.len()..])
}

/// Desktop applications the dispatcher can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    /// General web browser.
    Browser,
    /// Code editor.
    Editor,
    /// File manager.
    FileManager,
}

/// Well-known sites with a dedicated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// youtube.com
    YouTube,
    /// google.com
    Google,
    /// github.com
    GitHub,
}

impl Site {
    /// Home page URL.
    #[must_use]
    pub fn url(self) -> &'static str {
        match self {
            Site::YouTube => "https://www.youtube.com",
            Site::Google => "https://www.google.com",
            Site::GitHub => "https://github.com",
        }
    }
}

/// Search engines reachable with `search <engine> for <query>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    /// Google web search.
    Google,
    /// YouTube video search.
    YouTube,
}

impl SearchEngine {
    /// Search URL with `query` URL-encoded.
    #[must_use]
    pub fn search_url(self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            SearchEngine::Google => format!("https://www.google.com/search?q={encoded}"),
            SearchEngine::YouTube => {
                format!("https://www.youtube.com/results?search_query={encoded}")
            }
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::YouTube => "YouTube",
        }
    }
}

/// Media transport commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    /// Start or resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Skip forward.
    Next,
    /// Skip backward.
    Previous,
}

impl Media {
    /// Argument passed to the media controller.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Media::Play => "play",
            Media::Pause => "pause",
            Media::Next => "next",
            Media::Previous => "previous",
        }
    }
}

/// Read-only system probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// CPU snapshot.
    Cpu,
    /// Memory usage.
    Ram,
    /// Disk usage.
    Disk,
}

impl Probe {
    /// Shell pipeline run for the probe.
    #[must_use]
    pub fn script(self) -> &'static str {
        match self {
            Probe::Cpu => "top -b -n1 | head -n5",
            Probe::Ram => "free -h",
            Probe::Disk => "df -h | head -n10",
        }
    }

    /// Fixed text placed before the probe output.
    #[must_use]
    pub fn preamble(self) -> &'static str {
        match self {
            Probe::Cpu => "Here’s a quick CPU snapshot:\n",
            Probe::Ram => "Here’s your memory usage:\n",
            Probe::Disk => "Here’s your disk usage:\n",
        }
    }
}

/// What a rule does once matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Launch a desktop application.
    Launch(App),
    /// Open a well-known site.
    OpenSite(Site),
    /// Open the argument as a URL.
    OpenUrl,
    /// Search the web for the argument.
    WebSearch(SearchEngine),
    /// Control media playback.
    Media(Media),
    /// Report system information.
    SystemInfo(Probe),
    /// Create a folder (`<name> [in <dir>]`).
    CreateFolder,
    /// Create an empty file (`<name> [in <dir>]`).
    CreateFile,
    /// List a directory.
    ListFiles,
    /// Open a folder in the desktop file opener.
    OpenFolder,
    /// Search file names under the home directory.
    SearchFiles,
    /// Trash or delete a file (`<name> [in <dir>]`).
    DeleteFile,
    /// Trash or delete a folder (`<name> [in <dir>]`).
    DeleteFolder,
    /// Run the argument through the shell.
    RawCommand,
}

/// One entry of the dispatcher table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Stable name, used in logs and tests.
    pub name: &'static str,
    /// How the rule recognises input.
    pub matcher: Matcher,
    /// What it does.
    pub action: Action,
}

const fn rule(name: &'static str, matcher: Matcher, action: Action) -> Rule {
    Rule { name, matcher, action }
}

/// The dispatcher table in priority order.
pub static RULES: &[Rule] = &[
    // Apps
    rule("open_browser", Matcher::AnyOf(&["open browser", "open firefox"]), Action::Launch(App::Browser)),
    rule("open_editor", Matcher::AnyOf(&["open code", "open vscode", "open vs code"]), Action::Launch(App::Editor)),
    rule(
        "open_file_manager",
        Matcher::AnyOf(&["open files", "open file manager", "open dolphin"]),
        Action::Launch(App::FileManager),
    ),
    // Sites; "open youtube" is covered by the looser both-words form.
    rule("open_youtube", Matcher::AllOf(&["youtube", "open"]), Action::OpenSite(Site::YouTube)),
    rule("open_google", Matcher::AnyOf(&["open google"]), Action::OpenSite(Site::Google)),
    rule("open_github", Matcher::AnyOf(&["open github"]), Action::OpenSite(Site::GitHub)),
    rule("open_url", Matcher::Prefix("open:"), Action::OpenUrl),
    // Web search
    rule("search_google", Matcher::Prefix("search google for "), Action::WebSearch(SearchEngine::Google)),
    rule("search_youtube", Matcher::Prefix("search youtube for "), Action::WebSearch(SearchEngine::YouTube)),
    // Media
    rule("media_play", Matcher::AnyOf(&["play music", "resume music"]), Action::Media(Media::Play)),
    rule("media_pause", Matcher::AnyOf(&["pause music", "stop music"]), Action::Media(Media::Pause)),
    rule("media_next", Matcher::AnyOf(&["next song", "next track"]), Action::Media(Media::Next)),
    rule("media_previous", Matcher::AnyOf(&["previous song", "previous track"]), Action::Media(Media::Previous)),
    // System info
    rule("show_cpu", Matcher::AnyOf(&["show cpu", "cpu usage"]), Action::SystemInfo(Probe::Cpu)),
    rule("show_ram", Matcher::AnyOf(&["show ram", "memory usage"]), Action::SystemInfo(Probe::Ram)),
    rule("show_disk", Matcher::AnyOf(&["disk usage", "show disk"]), Action::SystemInfo(Probe::Disk)),
    // Filesystem
    rule("create_folder", Matcher::Prefix("create folder "), Action::CreateFolder),
    rule("create_file", Matcher::Prefix("create file "), Action::CreateFile),
    rule("list_files", Matcher::Prefix("list files in "), Action::ListFiles),
    rule("open_folder", Matcher::Prefix("open folder "), Action::OpenFolder),
    rule("search_files", Matcher::Prefix("search files for "), Action::SearchFiles),
    rule("delete_file", Matcher::Prefix("delete file "), Action::DeleteFile),
    rule("delete_folder", Matcher::Prefix("delete folder "), Action::DeleteFolder),
    // Raw passthrough
    rule("run_command", Matcher::Prefix("run:"), Action::RawCommand),
];

/// Every rule matching `input`, in priority order, with its argument.
///
/// The dispatcher executes these in turn until one produces a reply.
pub fn candidates(input: &str) -> impl Iterator<Item = (&'static Rule, &str)> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();
    RULES
        .iter()
        .filter_map(move |rule| rule.matcher.matches(trimmed, &lowered).map(|arg| (rule, arg)))
}

/// The highest-priority rule matching `input`, if any.
#[must_use]
pub fn resolve(input: &str) -> Option<&'static Rule> {
    candidates(input).next().map(|(rule, _)| rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(input: &str) -> Option<&'static str> {
        resolve(input).map(|r| r.name)
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn app_and_site_phrases() {
        assert_eq!(resolved("please open Firefox"), Some("open_browser"));
        assert_eq!(resolved("open VS Code"), Some("open_editor"));
        assert_eq!(resolved("open dolphin now"), Some("open_file_manager"));
        assert_eq!(resolved("open youtube"), Some("open_youtube"));
        assert_eq!(resolved("can you open some youtube"), Some("open_youtube"));
        assert_eq!(resolved("open google"), Some("open_google"));
        assert_eq!(resolved("open github"), Some("open_github"));
    }

    #[test]
    fn priority_favours_earlier_rules() {
        // Mentions youtube and open, so the site rule beats the URL rule.
        assert_eq!(resolved("open: https://youtube.com/watch"), Some("open_youtube"));
        assert_eq!(resolved("open: https://example.com"), Some("open_url"));
        // No "open" here, so the site rule does not apply.
        assert_eq!(resolved("search youtube for lofi"), Some("search_youtube"));
    }

    #[test]
    fn prefixes_are_case_insensitive_and_keep_original_argument() {
        let (rule, arg) = candidates("  Create Folder Demo in Documents ").next().expect("match");
        assert_eq!(rule.name, "create_folder");
        assert_eq!(arg, "Demo in Documents");

        let (rule, arg) = candidates("RUN: ls -la").next().expect("match");
        assert_eq!(rule.name, "run_command");
        assert_eq!(arg, " ls -la");
    }

    #[test]
    fn media_info_and_files() {
        assert_eq!(resolved("resume music"), Some("media_play"));
        assert_eq!(resolved("stop music please"), Some("media_pause"));
        assert_eq!(resolved("next track"), Some("media_next"));
        assert_eq!(resolved("previous song"), Some("media_previous"));
        assert_eq!(resolved("what's my cpu usage"), Some("show_cpu"));
        assert_eq!(resolved("memory usage"), Some("show_ram"));
        assert_eq!(resolved("show disk"), Some("show_disk"));
        assert_eq!(resolved("list files in Documents"), Some("list_files"));
        assert_eq!(resolved("search files for demo.py"), Some("search_files"));
        assert_eq!(resolved("delete folder tmp in Documents"), Some("delete_folder"));
    }

    #[test]
    fn bare_prefix_matches_with_empty_argument() {
        let (rule, arg) = candidates("  Search Google For  ").next().expect("match");
        assert_eq!(rule.name, "search_google");
        assert_eq!(arg, "");
        assert_eq!(resolved("run:"), Some("run_command"));
        // No separating space, so not a prefix match.
        assert_eq!(resolved("create folderx"), None);
    }

    #[test]
    fn prefix_rules_require_start_of_input() {
        assert_eq!(resolved("please create folder x"), None);
        assert_eq!(resolved("how do I run: things"), None);
    }

    #[test]
    fn plain_chat_matches_nothing() {
        assert_eq!(resolved("tell me about stoicism"), None);
        assert_eq!(resolved(""), None);
    }

    #[test]
    fn candidates_include_later_rules_for_fallthrough() {
        let names: Vec<_> = candidates("open:").map(|(r, _)| r.name).collect();
        assert_eq!(names, vec!["open_url"]);
    }

    #[test]
    fn strip_prefix_handles_short_and_multibyte_input() {
        assert_eq!(strip_prefix_ignore_case("op", "open:"), None);
        assert_eq!(strip_prefix_ignore_case("öpen: x", "open:"), None);
        assert_eq!(strip_prefix_ignore_case("OPEN:x", "open:"), Some("x"));
    }

    #[test]
    fn search_urls_are_encoded() {
        assert_eq!(
            SearchEngine::Google.search_url("rust async book"),
            "https://www.google.com/search?q=rust%20async%20book"
        );
    }
}
