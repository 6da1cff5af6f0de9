//! JSON persistence for the [`MemoryDocument`].
//!
//! The document is always read and written whole. Loading never fails: a
//! missing file yields a fresh document, and an unreadable or unparseable one
//! is moved aside to `<name>.corrupt` before a fresh document is returned, so
//! the next save cannot silently destroy it.
//!
//! Saving writes pretty-printed UTF-8 JSON. With `atomic_writes` enabled the
//! bytes go to a sibling `<name>.tmp` file first, which is flushed and then
//! renamed over the target. This protects against torn writes from a crash
//! mid-save on filesystems with atomic rename; it is not a transaction and
//! gives no guarantee across power loss without a directory fsync.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::MemoryConfig;
use crate::error::Result;
use crate::memory::MemoryDocument;

/// Handle to the on-disk memory document.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
    atomic_writes: bool,
}

impl MemoryStore {
    /// Create a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, atomic_writes: bool) -> Self {
        Self {
            path: path.into(),
            atomic_writes,
        }
    }

    /// Create a store from the `[memory]` config section.
    #[must_use]
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.path.clone(), config.atomic_writes)
    }

    /// Path of the document file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, falling back to a fresh one.
    ///
    /// Corrupt files are quarantined (see module docs) and logged.
    #[must_use]
    pub fn load(&self) -> MemoryDocument {
        match self.try_load() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                info!(path = %self.path.display(), "No memory file yet, starting fresh");
                MemoryDocument::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Memory file unreadable, starting fresh");
                self.quarantine();
                MemoryDocument::new()
            }
        }
    }

    /// Load the document, distinguishing "absent" from "corrupt".
    ///
    /// # Errors
    ///
    /// Returns [`crate::AzrionError::Io`] if the file exists but cannot be
    /// read, or [`crate::AzrionError::Serialization`] if it is not a valid
    /// document.
    pub fn try_load(&self) -> Result<Option<MemoryDocument>> {
        let start = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let doc: MemoryDocument = serde_json::from_slice(&bytes)?;

        debug!(
            path = %self.path.display(),
            messages = doc.full_history.len(),
            bytes = bytes.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Loaded memory document"
        );
        Ok(Some(doc))
    }

    /// Write the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AzrionError::Serialization`] if encoding fails, or
    /// [`crate::AzrionError::Io`] if the file cannot be written.
    pub fn save(&self, doc: &MemoryDocument) -> Result<()> {
        let start = Instant::now();
        let json = serde_json::to_vec_pretty(doc)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if self.atomic_writes {
            let tmp = self.sibling("tmp");
            {
                let mut file = fs::File::create(&tmp)?;
                file.write_all(&json)?;
                file.sync_all()?;
            }
            fs::rename(&tmp, &self.path)?;
        } else {
            fs::write(&self.path, &json)?;
        }

        debug!(
            path = %self.path.display(),
            messages = doc.full_history.len(),
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved memory document"
        );
        Ok(())
    }

    /// Move an unparseable document out of the way.
    fn quarantine(&self) {
        let dest = self.sibling("corrupt");
        match fs::rename(&self.path, &dest) {
            Ok(()) => warn!(dest = %dest.display(), "Corrupt memory file moved aside"),
            Err(e) => warn!(error = %e, "Could not move corrupt memory file aside"),
        }
    }

    /// `<file name>.<suffix>` next to the document (e.g. `memory.json.tmp`).
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| "memory".into(), std::ffi::OsStr::to_os_string);
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Message, Task};

    fn sample_doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.record(Message::user("I love coding at night"), 12);
        doc.record(Message::assistant("Night owl mode ON"), 12);
        doc.stats.insert("coding".into(), 3);
        doc.habits.insert("code".into(), 1);
        doc.tasks.push(Task::pending("finish parser"));
        doc.philosophy.liked_schools.push("stoicism".into());
        doc
    }

    #[test]
    fn round_trip_save_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MemoryStore::new(dir.path().join("azrion_memory.json"), true);
        let doc = sample_doc();

        store.save(&doc).expect("save");
        let loaded = store.try_load().expect("load").expect("Some");

        assert_eq!(loaded, doc);
        assert!(!dir.path().join("azrion_memory.json.tmp").exists());
    }

    #[test]
    fn missing_file_loads_fresh_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MemoryStore::new(dir.path().join("nope.json"), true);
        assert!(store.try_load().expect("load").is_none());
        assert_eq!(store.load(), MemoryDocument::new());
    }

    #[test]
    fn corrupt_file_is_quarantined() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        fs::write(&path, b"{ not json").expect("write");

        let store = MemoryStore::new(&path, true);
        assert!(store.try_load().is_err());

        let doc = store.load();
        assert_eq!(doc, MemoryDocument::new());
        assert!(!path.exists());
        assert!(dir.path().join("memory.json.corrupt").exists());
    }

    #[test]
    fn legacy_document_with_preferences_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        fs::write(
            &path,
            r#"{"history": [], "preferences": {"style": "short"}, "stats": {"hello": 2}}"#,
        )
        .expect("write");

        let store = MemoryStore::new(&path, false);
        let doc = store.load();
        assert_eq!(doc.stats.get("hello"), Some(&2));
        assert_eq!(doc.preferences["style"], "short");

        store.save(&doc).expect("save");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.contains("\"style\": \"short\""), "pretty-printed output: {text}");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MemoryStore::new(dir.path().join("nested/state/memory.json"), true);
        store.save(&sample_doc()).expect("save");
        assert!(store.path().exists());
    }
}
