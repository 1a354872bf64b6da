// src/domain/error.rs
use thiserror::Error;

use crate::domain::NoteId;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),
    #[error("Invalid note id: {0:?}")]
    InvalidNoteId(String),
    #[error("No rendered row carries note id {0:?}")]
    RowNotFound(String),
    #[error("Stored notes are corrupt: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures reported by a `KeyValueStorage` backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage quota exceeded writing {key:?}: {size} bytes > {limit} bytes")]
    QuotaExceeded { key: String, size: usize, limit: usize },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
