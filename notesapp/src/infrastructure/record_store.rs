// src/infrastructure/record_store.rs
use crate::application::NoteRepository;
use crate::constants::{DEFAULT_STORAGE_KEY, SAMPLE_NOTES};
use crate::domain::{DomainError, Note, NoteDraft, NoteId};
use crate::infrastructure::storage::KeyValueStorage;
use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, instrument};

/// Note records kept as one JSON array under a single storage key.
///
/// Every mutation is a whole-collection read-modify-write: one `get`, one
/// `set`. This is only safe while a single writer owns the slot.
pub struct RecordStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        debug!(%key, "Creating new RecordStore");
        Self { storage, key }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// All notes, most recently updated first.
    ///
    /// Order among notes with identical timestamps is unspecified.
    #[instrument(level = "debug", skip(self))]
    pub fn list_all(&self) -> Result<Vec<Note>, DomainError> {
        let mut notes = self.load()?;
        notes.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(notes)
    }

    /// Insert or update a note and return it as persisted.
    ///
    /// A draft whose id matches a stored note overwrites that note's title and
    /// body; anything else is appended under a freshly generated id.
    #[instrument(level = "debug", skip(self, draft), fields(id = ?draft.id))]
    pub fn save(&mut self, draft: NoteDraft) -> Result<Note, DomainError> {
        let mut notes = self.load()?;
        let now = now();

        let position = draft
            .id
            .and_then(|id| notes.iter().position(|note| note.id == id));

        let saved = match position {
            Some(index) => {
                let existing = &mut notes[index];
                existing.title = draft.title;
                existing.body = draft.body;
                existing.updated = now.max(existing.updated);
                debug!(note_id = existing.id, "Updating existing note");
                existing.clone()
            }
            None => {
                let note = Note {
                    id: next_id(&notes),
                    title: draft.title,
                    body: draft.body,
                    updated: now,
                };
                debug!(note_id = note.id, requested = ?draft.id, "Inserting new note");
                notes.push(note.clone());
                note
            }
        };

        self.persist(&notes)?;
        info!(note_id = saved.id, "Saved note");
        Ok(saved)
    }

    /// Remove every note with `id`. Returns how many were removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_by_id(&mut self, id: NoteId) -> Result<usize, DomainError> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        let removed = before - notes.len();

        self.persist(&notes)?;
        if removed == 0 {
            debug!(note_id = id, "No note to delete");
        } else {
            info!(note_id = id, removed, "Deleted note");
        }
        Ok(removed)
    }

    /// Overwrite the store with the two sample notes.
    #[instrument(level = "debug", skip(self))]
    pub fn reset_to_sample(&mut self) -> Result<Vec<Note>, DomainError> {
        let now = now();
        let mut notes: Vec<Note> = Vec::with_capacity(SAMPLE_NOTES.len());
        for (title, body) in SAMPLE_NOTES {
            notes.push(Note {
                id: next_id(&notes),
                title: title.to_string(),
                body: body.to_string(),
                updated: now,
            });
        }

        self.persist(&notes)?;
        info!(count = notes.len(), "Reset store to sample notes");
        Ok(notes)
    }

    fn load(&self) -> Result<Vec<Note>, DomainError> {
        match self.storage.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    fn persist(&mut self, notes: &[Note]) -> Result<(), DomainError> {
        let payload = serde_json::to_string(notes)?;
        self.storage.set(&self.key, &payload)?;
        Ok(())
    }
}

impl<S: KeyValueStorage> NoteRepository for RecordStore<S> {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        self.list_all()
    }

    fn save_note(&mut self, draft: NoteDraft) -> Result<Note, DomainError> {
        self.save(draft)
    }

    fn delete_note(&mut self, id: NoteId) -> Result<usize, DomainError> {
        self.delete_by_id(id)
    }

    fn reset_to_sample(&mut self) -> Result<Vec<Note>, DomainError> {
        RecordStore::reset_to_sample(self)
    }
}

// Stored timestamps carry millisecond precision.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// One past the largest live id; falls back to the smallest unused positive id
/// if that would overflow.
fn next_id(notes: &[Note]) -> NoteId {
    let max = notes.iter().map(|note| note.id).max().unwrap_or(0);
    match max.checked_add(1) {
        Some(id) if id > 0 => id,
        _ => (1..)
            .find(|candidate| notes.iter().all(|note| note.id != *candidate))
            .unwrap_or(1),
    }
}
