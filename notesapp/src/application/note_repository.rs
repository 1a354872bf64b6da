// src/application/note_repository.rs
use crate::domain::{DomainError, Note, NoteDraft, NoteId};

pub trait NoteRepository {
    /// All notes, most recently updated first
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError>;

    /// Update the note whose id matches the draft, or insert a new one.
    /// Returns the note as persisted, with its id and timestamp.
    fn save_note(&mut self, draft: NoteDraft) -> Result<Note, DomainError>;

    /// Delete every note with `id`; deleting an unknown id is a no-op.
    /// Returns the number of notes removed
    fn delete_note(&mut self, id: NoteId) -> Result<usize, DomainError>;

    /// Replace the whole collection with the sample notes
    fn reset_to_sample(&mut self) -> Result<Vec<Note>, DomainError>;
}
