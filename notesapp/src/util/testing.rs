// src/util/testing.rs

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::env;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::constants::SAMPLE_NOTES;
use crate::domain::{DomainError, Note, NoteDraft, NoteId, StorageError};
use crate::ports::{ConfirmPrompt, ViewCallbacks};

/// In-memory NoteRepository for testing the controller without storage
///
/// Keeps notes in insertion order, lists them newest first, and records every
/// draft it was asked to save.
///
/// # Examples
///
/// ```
/// use notesapp::application::NoteRepository;
/// use notesapp::util::testing::MockNoteRepository;
///
/// let mut mock = MockNoteRepository::builder()
///     .with_note(1, "Groceries", "milk")
///     .failing_writes()
///     .build();
/// assert_eq!(mock.list_notes().unwrap().len(), 1);
/// ```
pub struct MockNoteRepository {
    notes: Vec<Note>,
    saved: Vec<NoteDraft>,
    fail_writes: bool,
    clock: DateTime<Utc>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    /// Drafts passed to `save_note`, in call order
    pub fn saved(&self) -> &[NoteDraft] {
        &self.saved
    }

    // Every write advances the clock by one second so ordering is deterministic.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += chrono::Duration::seconds(1);
        self.clock
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("mock write failure".to_string()).into());
        }
        Ok(())
    }
}

impl NoteRepository for MockNoteRepository {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(notes)
    }

    fn save_note(&mut self, draft: NoteDraft) -> Result<Note, DomainError> {
        self.saved.push(draft.clone());
        self.check_writable()?;
        let updated = self.tick();

        if let Some(existing) = draft
            .id
            .and_then(|id| self.notes.iter_mut().find(|n| n.id == id))
        {
            existing.title = draft.title;
            existing.body = draft.body;
            existing.updated = updated;
            return Ok(existing.clone());
        }

        let id = self.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let note = Note {
            id,
            title: draft.title,
            body: draft.body,
            updated,
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    fn delete_note(&mut self, id: NoteId) -> Result<usize, DomainError> {
        self.check_writable()?;
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        Ok(before - self.notes.len())
    }

    fn reset_to_sample(&mut self) -> Result<Vec<Note>, DomainError> {
        self.check_writable()?;
        let updated = self.tick();
        self.notes = SAMPLE_NOTES
            .iter()
            .zip(1..)
            .map(|((title, body), id)| Note {
                id,
                title: title.to_string(),
                body: body.to_string(),
                updated,
            })
            .collect();
        Ok(self.notes.clone())
    }
}

/// Builder for MockNoteRepository
///
/// Notes added later get later `updated` stamps.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    fail_writes: bool,
    clock: DateTime<Utc>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            fail_writes: false,
            clock: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        }
    }

    /// Add a stored note
    pub fn with_note(mut self, id: NoteId, title: &str, body: &str) -> Self {
        self.clock += chrono::Duration::seconds(1);
        self.notes.push(Note {
            id,
            title: title.to_string(),
            body: body.to_string(),
            updated: self.clock,
        });
        self
    }

    /// Make every save/delete/reset fail with a storage error
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: self.notes,
            saved: vec![],
            fail_writes: self.fail_writes,
            clock: self.clock,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirmation prompt with a canned answer that remembers what it was asked.
#[derive(Debug, Clone)]
pub struct FixedConfirm {
    answer: bool,
    asked: Rc<RefCell<Vec<String>>>,
}

impl FixedConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Rc::default(),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            asked: Rc::default(),
        }
    }

    /// Shared handle on the messages shown so far
    pub fn asked(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.asked)
    }
}

impl ConfirmPrompt for FixedConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Select(String),
    Add,
    Edit { title: String, body: String },
    Delete(String),
}

/// Records view callback invocations in order.
#[derive(Debug, Clone, Default)]
pub struct CallbackLog {
    calls: Rc<RefCell<Vec<Invocation>>>,
}

impl CallbackLog {
    /// Callbacks that append to this log
    pub fn callbacks(&self) -> ViewCallbacks {
        let select = Rc::clone(&self.calls);
        let add = Rc::clone(&self.calls);
        let edit = Rc::clone(&self.calls);
        let delete = Rc::clone(&self.calls);
        ViewCallbacks::default()
            .on_select(move |id| select.borrow_mut().push(Invocation::Select(id.to_string())))
            .on_add(move || add.borrow_mut().push(Invocation::Add))
            .on_edit(move |title, body| {
                edit.borrow_mut().push(Invocation::Edit {
                    title: title.to_string(),
                    body: body.to_string(),
                })
            })
            .on_delete(move |id| delete.borrow_mut().push(Invocation::Delete(id.to_string())))
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
