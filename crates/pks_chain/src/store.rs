//! Chain entry stores.
//!
//! A store is an ordered log of base64 entry strings. Two variants:
//! in-memory (tests, scratch chains) and a line-delimited file. Stores
//! are addressed by a locator string that round-trips through
//! [`create_store`]:
//!
//! - `<path>@localhost` — file store at `<path>`
//! - `@inmemory`        — memory store

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub const MEMORY_LOCATION: &str = "@inmemory";
pub const LOCALHOST_SUFFIX: &str = "@localhost";

pub trait Store: std::fmt::Debug {
    /// All entries in append order.
    fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the contents with `entries`, in order.
    fn store(&mut self, entries: &[String]) -> Result<(), StoreError>;

    /// Append one entry.
    fn add(&mut self, entry: &str) -> Result<(), StoreError>;

    /// A locator that [`create_store`] maps back to an equivalent store.
    fn location(&self) -> String;
}

/// Build a store from a locator. `seed` pre-populates a memory store and
/// is ignored for other variants.
pub fn create_store(
    loc: &str,
    seed: Option<Vec<String>>,
) -> Result<Box<dyn Store>, StoreError> {
    if let Some(path) = loc.strip_suffix(LOCALHOST_SUFFIX) {
        Ok(Box::new(FileStore::new(path)))
    } else if loc == MEMORY_LOCATION {
        Ok(Box::new(match seed {
            Some(entries) => MemoryStore::seeded(entries),
            None => MemoryStore::new(),
        }))
    } else {
        Err(StoreError::UnsupportedStore(loc.to_string()))
    }
}

// ── Memory store ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub entries: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.clone())
    }

    fn store(&mut self, entries: &[String]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }

    fn add(&mut self, entry: &str) -> Result<(), StoreError> {
        self.entries.push(entry.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }
}

// ── File store ────────────────────────────────────────────────────────────────

/// One entry per `\n`-terminated line. No persistent handle: every
/// operation opens the file and releases it before returning, so a
/// failed append never leaves the store locked. A missing file reads as
/// an empty chain; a final unterminated line is yielded as-is and left
/// for validation to reject.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let entries = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn store(&mut self, entries: &[String]) -> Result<(), StoreError> {
        let mut file = File::create(&self.path)?;
        for entry in entries {
            writeln!(file, "{entry}")?;
        }
        file.flush()?;
        Ok(())
    }

    fn add(&mut self, entry: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{entry}")?;
        file.flush()?;
        Ok(())
    }

    fn location(&self) -> String {
        format!("{}{LOCALHOST_SUFFIX}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_add() {
        let mut ms = MemoryStore::new();
        ms.add("an entry").unwrap();
        assert_eq!(ms.entries, vec!["an entry"]);
    }

    #[test]
    fn memory_store_replaces_contents() {
        let mut ms = MemoryStore::seeded(vec!["old".into()]);
        ms.store(&["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(ms.entries, vec!["a", "b", "c"]);
    }

    #[test]
    fn file_store_writes_one_entry_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain");
        let mut fs = FileStore::new(&path);
        fs.store(&["a".into(), "b".into()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn file_store_add_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain");
        let mut fs = FileStore::new(&path);
        fs.add("an entry").unwrap();
        fs.add("another").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "an entry\nanother\n"
        );
    }

    #[test]
    fn file_store_load_strips_newlines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain");
        std::fs::write(&path, "a\nb\n").unwrap();
        let fs = FileStore::new(&path);
        assert_eq!(fs.load().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let fs = FileStore::new(dir.path().join("absent"));
        assert_eq!(fs.load().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn create_store_empty_in_memory() {
        let store = create_store("@inmemory", None).unwrap();
        assert_eq!(store.load().unwrap().len(), 0);
        assert_eq!(store.location(), "@inmemory");
    }

    #[test]
    fn create_store_seeded_in_memory() {
        let store = create_store("@inmemory", Some(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(store.load().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn create_store_file_round_trips_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain");
        let mut fs = FileStore::new(&path);
        fs.add("an entry").unwrap();

        let reopened = create_store(&fs.location(), None).unwrap();
        assert_eq!(reopened.load().unwrap(), vec!["an entry"]);
        assert_eq!(reopened.location(), fs.location());
    }

    #[test]
    fn create_store_unknown_scheme() {
        let err = create_store("@unknown", None).unwrap_err();
        assert!(err.to_string().starts_with("Unsupported"));
    }
}
