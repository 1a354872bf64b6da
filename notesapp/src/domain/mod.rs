// src/domain/mod.rs
pub mod error;
pub mod note;

pub use error::{DomainError, StorageError};
pub use note::{Note, NoteDraft, NoteId};
