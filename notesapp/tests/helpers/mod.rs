use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use notesapp::domain::Note;
use notesapp::infrastructure::{DirStorage, KeyValueStorage, RecordStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for a record store backed by a temporary directory
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub storage_dir: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Create an empty storage directory
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let storage_dir = temp_dir.path().join("storage");
        Ok(Self {
            _temp_dir: temp_dir,
            storage_dir,
        })
    }

    /// Create a storage directory whose slot already holds `notes`
    pub fn with_notes(notes: &[Note]) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_raw(&serde_json::to_string(notes)?)?;
        Ok(fixture)
    }

    /// Overwrite the slot with an arbitrary payload
    pub fn write_raw(&self, payload: &str) -> Result<()> {
        DirStorage::new(&self.storage_dir).set(notesapp::constants::DEFAULT_STORAGE_KEY, payload)?;
        Ok(())
    }

    pub fn read_raw(&self) -> Result<Option<String>> {
        Ok(DirStorage::new(&self.storage_dir).get(notesapp::constants::DEFAULT_STORAGE_KEY)?)
    }

    /// Open a fresh store over this directory
    pub fn open(&self) -> RecordStore<DirStorage> {
        RecordStore::new(DirStorage::new(&self.storage_dir))
    }
}

#[allow(dead_code)]
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn note(id: i64, title: &str, body: &str, updated: DateTime<Utc>) -> Note {
    Note {
        id,
        title: title.to_string(),
        body: body.to_string(),
        updated,
    }
}
