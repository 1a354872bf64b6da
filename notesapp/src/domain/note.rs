// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub type NoteId = i64;

/// A persisted note, exactly as it is stored.
///
/// `updated` serializes as an ISO-8601 UTC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub updated: DateTime<Utc>,
}

/// Candidate handed to a save: a missing or unknown id means insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<NoteId>,
    pub title: String,
    pub body: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn with_id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            body: note.body.clone(),
        }
    }
}

/// Coerce a row id, as it travels through `data-note-id`, into a store id.
pub fn parse_note_id(raw: &str) -> Result<NoteId, DomainError> {
    raw.trim()
        .parse::<NoteId>()
        .map_err(|_| DomainError::InvalidNoteId(raw.to_string()))
}
