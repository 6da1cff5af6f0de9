//! Filesystem actions. Every failure becomes a reply string.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use super::runner::{CommandOutcome, CommandRunner};

/// Maximum entries shown by a directory listing.
pub const LIST_LIMIT: usize = 50;
/// Maximum paths shown by a file search.
pub const SEARCH_LIMIT: usize = 30;

/// A `<name> [in <dir>]` argument resolved against the home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The entry name as typed.
    pub name: String,
    /// Directory the entry lives in.
    pub dir: PathBuf,
}

impl Target {
    /// Split `rest` on the first literal `" in "`. Without one, the whole
    /// argument is the name and the directory is `home`.
    #[must_use]
    pub fn parse(rest: &str, home: &Path) -> Self {
        let rest = rest.trim();
        let (name, rel) = rest.split_once(" in ").unwrap_or((rest, ""));
        let rel = rel.trim();
        let dir = if rel.is_empty() { home.to_path_buf() } else { home.join(rel) };
        Self {
            name: name.trim().to_string(),
            dir,
        }
    }

    /// Full path of the entry.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Whether removing this entry would remove `home` itself or one of its
    /// ancestors (`.`, `..`, `x/..`, `/`).
    #[must_use]
    pub fn encloses(&self, home: &Path) -> bool {
        normalize(home).starts_with(normalize(&self.path()))
    }
}

/// Resolve `.` and `..` lexically. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Create a folder and any missing parents. Repeating it is harmless.
pub fn create_folder(target: &Target) -> String {
    match fs::create_dir_all(target.path()) {
        Ok(()) => format!("Created folder '{}' in '{}'.", target.name, target.dir.display()),
        Err(e) => format!("Could not create folder: {e}"),
    }
}

/// Create an empty file unless it already exists.
pub fn create_file(target: &Target) -> String {
    let created = fs::create_dir_all(&target.dir).and_then(|()| {
        let path = target.path();
        if path.exists() {
            Ok(())
        } else {
            fs::File::create(path).map(drop)
        }
    });
    match created {
        Ok(()) => format!("Created file '{}' in '{}'.", target.name, target.dir.display()),
        Err(e) => format!("Could not create file: {e}"),
    }
}

/// List up to [`LIST_LIMIT`] entry names of `dir`, sorted.
pub fn list_files(dir: &Path) -> String {
    if !dir.is_dir() {
        return format!("'{}' is not a directory.", dir.display());
    }
    let names = fs::read_dir(dir).and_then(|entries| {
        entries
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()
    });
    match names {
        Ok(names) if names.is_empty() => format!("No files in '{}'.", dir.display()),
        Ok(mut names) => {
            names.sort();
            names.truncate(LIST_LIMIT);
            format!("Files in '{}':\n{}", dir.display(), names.join("\n"))
        }
        Err(e) => format!("Could not list files: {e}"),
    }
}

/// Render file search output: the first [`SEARCH_LIMIT`] lines, or a
/// not-found message when the tool printed nothing. A tool that could not
/// run is reported as such.
#[must_use]
pub fn format_search(pattern: &str, outcome: &CommandOutcome) -> String {
    let CommandOutcome::Output(out) = outcome else {
        return outcome.text();
    };
    if out.trim().is_empty() {
        return format!("No files found matching '{pattern}'.");
    }
    let lines: Vec<&str> = out.lines().take(SEARCH_LIMIT).collect();
    format!("Found these paths for '{pattern}':\n{}", lines.join("\n"))
}

/// Whether a delete targets a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory, removed recursively.
    Folder,
}

impl EntryKind {
    fn noun(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        }
    }

    fn title(self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Folder => "Folder",
        }
    }
}

/// Move an entry to the trash, trying `trash-put` then `gio trash`, and
/// delete it permanently only when neither tool is installed.
///
/// A missing target, or one that would take `home` with it, is reported
/// without side effects.
pub async fn delete(
    kind: EntryKind,
    target: &Target,
    home: &Path,
    runner: &dyn CommandRunner,
) -> String {
    let path = target.path();
    if target.encloses(home) {
        warn!(path = %path.display(), "Refusing to delete home directory or an ancestor");
        return format!(
            "I won't delete '{}': it would remove your home directory.",
            path.display()
        );
    }
    if !path.exists() {
        return format!("{} '{}' does not exist.", kind.title(), path.display());
    }
    let shown = path.display().to_string();
    let arg = vec![shown.clone()];

    if !runner.run("trash-put", &arg).await.is_unavailable() {
        return format!("Moved {} '{shown}' to Trash.", kind.noun());
    }
    let gio_args = vec!["trash".to_string(), shown.clone()];
    if !runner.run("gio", &gio_args).await.is_unavailable() {
        return format!("Moved {} '{shown}' to Trash.", kind.noun());
    }

    info!(path = %shown, "No trash tool available, deleting permanently");
    let removed = match kind {
        EntryKind::File => fs::remove_file(&path),
        EntryKind::Folder => fs::remove_dir_all(&path),
    };
    match removed {
        Ok(()) => format!("Permanently deleted {} '{shown}'.", kind.noun()),
        Err(e) => format!("Could not delete {}: {e}", kind.noun()),
    }
}
