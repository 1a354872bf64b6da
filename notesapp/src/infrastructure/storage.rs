// src/infrastructure/storage.rs
use crate::domain::StorageError;
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, trace};

/// Synchronous string key-value storage, the shape of a browser's local storage.
pub trait KeyValueStorage {
    /// Returns `None` when the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage with an optional per-value quota.
///
/// Counts reads and writes so callers can assert on access patterns.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
    reads: Cell<usize>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single value larger than `limit` bytes.
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.writes += 1;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that keeps each key in `<dir>/<key>.json`.
///
/// Writes go through a temp file in the same directory and are renamed into
/// place, so a slot is never observed half-written.
#[derive(Debug, Clone)]
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = PathBuf::from(dir.as_ref());
        debug!(?dir, "Creating new DirStorage");
        Self { dir }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Unavailable(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for DirStorage {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(?path, "Slot not written yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(level = "trace", skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_unwritten_key_when_getting_then_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = DirStorage::new(temp_dir.path());

        assert_eq!(storage.get("notes").unwrap(), None);
    }

    #[test]
    fn given_written_key_when_getting_then_returns_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = DirStorage::new(temp_dir.path().join("nested"));

        storage.set("notes", "[1,2]").unwrap();

        assert_eq!(storage.get("notes").unwrap().as_deref(), Some("[1,2]"));
        assert!(temp_dir.path().join("nested/notes.json").exists());
    }

    #[test]
    fn given_existing_value_when_setting_then_replaces_it() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = DirStorage::new(temp_dir.path());

        storage.set("notes", "old").unwrap();
        storage.set("notes", "new").unwrap();

        assert_eq!(storage.get("notes").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn given_path_like_key_when_setting_then_returns_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = DirStorage::new(temp_dir.path());

        let result = storage.set("../escape", "x");

        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn given_quota_when_value_too_large_then_rejects_and_keeps_old_value() {
        let mut storage = MemoryStorage::new().with_quota(4);
        storage.set("k", "abcd").unwrap();

        let result = storage.set("k", "abcde");

        match result {
            Err(StorageError::QuotaExceeded { size, limit, .. }) => {
                assert_eq!(size, 5);
                assert_eq!(limit, 4);
            }
            other => panic!("Expected QuotaExceeded, got {:?}", other),
        }
        assert_eq!(storage.raw("k"), Some("abcd"));
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn given_memory_storage_when_reading_then_counts_reads() {
        let storage = MemoryStorage::new().with_value("k", "v");

        let _ = storage.get("k").unwrap();
        let _ = storage.get("missing").unwrap();

        assert_eq!(storage.reads(), 2);
    }
}
