// src/application/notes_app.rs
//! Controller tying a `NoteRepository` to a `ListView`.
//!
//! The view's callbacks only enqueue an [`Intent`]; `dispatch` drains the queue
//! after each gesture, so every repository call and re-render for one gesture
//! finishes before the next gesture is handled.
use crate::application::NoteRepository;
use crate::constants::{NEW_NOTE_BODY, NEW_NOTE_TITLE};
use crate::domain::note::parse_note_id;
use crate::domain::{DomainError, Note, NoteDraft, NoteId};
use crate::ports::{ConfirmPrompt, Gesture, ListView, ViewCallbacks};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// What the user asked for, as reported by the view callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(String),
    Add,
    Edit { title: String, body: String },
    Delete(String),
}

type IntentQueue = Rc<RefCell<VecDeque<Intent>>>;

pub struct NotesApp<R: NoteRepository> {
    repository: R,
    view: ListView,
    intents: IntentQueue,
    notes: Vec<Note>,
    active: Option<NoteId>,
}

impl<R: NoteRepository> NotesApp<R> {
    /// Mount the view and show the stored notes, selecting the newest.
    pub fn new(
        repository: R,
        root_id: impl Into<String>,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Result<Self, DomainError> {
        let intents = IntentQueue::default();
        let view = ListView::new(root_id, queue_callbacks(&intents), prompt);

        let mut app = Self {
            repository,
            view,
            intents,
            notes: Vec::new(),
            active: None,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Feed one gesture to the view and apply whatever it asked for.
    ///
    /// On error the remaining queued intents are dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, gesture: Gesture) -> Result<(), DomainError> {
        self.view.handle(gesture)?;
        loop {
            let next = self.intents.borrow_mut().pop_front();
            let Some(intent) = next else {
                return Ok(());
            };
            if let Err(e) = self.apply(intent) {
                self.intents.borrow_mut().clear();
                return Err(e);
            }
        }
    }

    /// Overwrite storage with the sample notes and re-render.
    pub fn reset_to_sample(&mut self) -> Result<(), DomainError> {
        self.repository.reset_to_sample()?;
        self.refresh()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active
            .and_then(|id| self.notes.iter().find(|note| note.id == id))
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Mutable view access, e.g. to type into the editor fields.
    pub fn view_mut(&mut self) -> &mut ListView {
        &mut self.view
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn apply(&mut self, intent: Intent) -> Result<(), DomainError> {
        debug!(?intent, "Applying intent");
        match intent {
            Intent::Select(raw) => {
                let id = parse_note_id(&raw)?;
                let note = self
                    .notes
                    .iter()
                    .find(|note| note.id == id)
                    .cloned()
                    .ok_or(DomainError::NoteNotFound(id))?;
                self.set_active(&note)
            }
            Intent::Add => {
                let saved = self
                    .repository
                    .save_note(NoteDraft::new(NEW_NOTE_TITLE, NEW_NOTE_BODY))?;
                info!(note_id = saved.id, "Added note");
                self.refresh()?;
                self.set_active(&saved)
            }
            Intent::Edit { title, body } => match self.active {
                Some(id) => {
                    let saved = self
                        .repository
                        .save_note(NoteDraft::new(title, body).with_id(id))?;
                    self.refresh()?;
                    self.set_active(&saved)
                }
                None => {
                    debug!("No active note, ignoring edit");
                    Ok(())
                }
            },
            Intent::Delete(raw) => {
                let id = parse_note_id(&raw)?;
                self.repository.delete_note(id)?;
                self.refresh()
            }
        }
    }

    fn refresh(&mut self) -> Result<(), DomainError> {
        let notes = self.repository.list_notes()?;
        self.view.render_list(&notes);
        self.view.set_preview_visible(!notes.is_empty());
        self.notes = notes;
        self.active = None;

        if let Some(first) = self.notes.first().cloned() {
            self.set_active(&first)?;
        }
        Ok(())
    }

    fn set_active(&mut self, note: &Note) -> Result<(), DomainError> {
        self.view.render_active(note)?;
        self.active = Some(note.id);
        Ok(())
    }
}

fn queue_callbacks(intents: &IntentQueue) -> ViewCallbacks {
    let select = Rc::clone(intents);
    let add = Rc::clone(intents);
    let edit = Rc::clone(intents);
    let delete = Rc::clone(intents);
    ViewCallbacks::default()
        .on_select(move |id| select.borrow_mut().push_back(Intent::Select(id.to_string())))
        .on_add(move || add.borrow_mut().push_back(Intent::Add))
        .on_edit(move |title, body| {
            edit.borrow_mut().push_back(Intent::Edit {
                title: title.to_string(),
                body: body.to_string(),
            })
        })
        .on_delete(move |id| delete.borrow_mut().push_back(Intent::Delete(id.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{FixedConfirm, MockNoteRepository};

    fn app(mock: MockNoteRepository) -> NotesApp<MockNoteRepository> {
        NotesApp::new(mock, "app", Box::new(FixedConfirm::yes())).expect("App should start")
    }

    #[test]
    fn given_empty_repository_when_starting_then_preview_hidden_and_nothing_active() {
        let app = app(MockNoteRepository::builder().build());

        assert!(app.notes().is_empty());
        assert!(app.active_note().is_none());
        assert!(!app.view().is_preview_visible());
    }

    #[test]
    fn given_stored_notes_when_starting_then_newest_is_active() {
        let app = app(
            MockNoteRepository::builder()
                .with_note(1, "old", "")
                .with_note(2, "new", "fresh")
                .build(),
        );

        assert_eq!(app.active_note().map(|n| n.id), Some(2));
        assert_eq!(app.view().selected_note_id(), Some("2"));
        assert_eq!(app.view().body_value(), "fresh");
        assert!(app.view().is_preview_visible());
    }

    #[test]
    fn given_no_active_note_when_field_blurs_then_edit_is_ignored() {
        // Arrange
        let mut app = app(MockNoteRepository::builder().build());
        app.view_mut().set_title_value("orphan");

        // Act
        app.dispatch(Gesture::BlurTitle).unwrap();

        // Assert
        assert!(app.repository().saved().is_empty());
        assert!(app.notes().is_empty());
    }

    #[test]
    fn given_active_note_when_field_blurs_then_saves_under_active_id() {
        // Arrange
        let mut app = app(
            MockNoteRepository::builder()
                .with_note(1, "a", "")
                .with_note(2, "b", "")
                .build(),
        );
        app.dispatch(Gesture::ClickRow("1".to_string())).unwrap();
        app.view_mut().set_body_value(" changed ");

        // Act
        app.dispatch(Gesture::BlurBody).unwrap();

        // Assert
        assert_eq!(
            app.repository().saved(),
            &[NoteDraft::new("a", "changed").with_id(1)]
        );
        assert_eq!(app.notes()[0].id, 1);
        assert_eq!(app.active_note().map(|n| n.body.as_str()), Some("changed"));
    }

    #[test]
    fn given_add_click_when_dispatching_then_new_note_is_active() {
        let mut app = app(MockNoteRepository::builder().with_note(1, "a", "").build());

        app.dispatch(Gesture::ClickAdd).unwrap();

        let active = app.active_note().expect("New note should be active");
        assert_eq!(active.title, NEW_NOTE_TITLE);
        assert_eq!(active.body, NEW_NOTE_BODY);
        assert_eq!(app.notes().len(), 2);
    }

    #[test]
    fn given_confirmed_double_click_when_dispatching_then_note_removed() {
        let mut app = app(
            MockNoteRepository::builder()
                .with_note(1, "a", "")
                .with_note(2, "b", "")
                .build(),
        );

        app.dispatch(Gesture::DoubleClickRow("2".to_string())).unwrap();

        let ids: Vec<NoteId> = app.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(app.view().selected_note_id(), Some("1"));
    }

    #[test]
    fn given_declined_double_click_when_dispatching_then_notes_unchanged() {
        let mock = MockNoteRepository::builder().with_note(1, "a", "").build();
        let mut app = NotesApp::new(mock, "app", Box::new(FixedConfirm::no())).unwrap();

        app.dispatch(Gesture::DoubleClickRow("1".to_string())).unwrap();

        assert_eq!(app.notes().len(), 1);
    }

    #[test]
    fn given_last_note_deleted_when_dispatching_then_preview_hidden() {
        let mut app = app(MockNoteRepository::builder().with_note(1, "a", "").build());

        app.dispatch(Gesture::DoubleClickRow("1".to_string())).unwrap();

        assert!(app.notes().is_empty());
        assert!(app.active_note().is_none());
        assert!(!app.view().is_preview_visible());
    }

    #[test]
    fn given_failing_writes_when_adding_then_error_propagates_and_view_kept() {
        let mock = MockNoteRepository::builder()
            .with_note(1, "a", "")
            .failing_writes()
            .build();
        let mut app = app(mock);

        let result = app.dispatch(Gesture::ClickAdd);

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert_eq!(app.view().rows().len(), 1);
        assert_eq!(app.active_note().map(|n| n.id), Some(1));
    }

    #[test]
    fn given_unrendered_row_when_clicking_then_lookup_error() {
        let mut app = app(MockNoteRepository::builder().with_note(1, "a", "").build());

        let result = app.dispatch(Gesture::ClickRow("42".to_string()));

        assert!(matches!(result, Err(DomainError::RowNotFound(_))));
    }

    #[test]
    fn given_reset_when_applied_then_shows_sample_notes() {
        let mut app = app(MockNoteRepository::builder().with_note(9, "mine", "").build());

        app.reset_to_sample().unwrap();

        assert_eq!(app.notes().len(), 2);
        assert!(app.notes().iter().all(|n| n.id != 9));
        assert!(app.active_note().is_some());
    }
}
