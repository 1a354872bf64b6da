// src/application/mod.rs
pub mod note_repository;
pub mod notes_app;

pub use note_repository::NoteRepository;
pub use notes_app::{Intent, NotesApp};
