// src/ports/list_view.rs
//! Sidebar list and detail editor, rendered headlessly.
//!
//! `ListView` holds only what is currently painted: the rows built by the
//! last `render_list`, the editor field values and pane visibility. User
//! gestures are fed in as [`Gesture`] values and translated into the four
//! [`ViewCallbacks`]. It never touches storage.
//!
//! Markup contract: rows carry `notes__list-item` and `data-note-id`; the
//! selected row additionally carries `notes__list-item--selected`.
use crate::constants::DELETE_CONFIRM_MESSAGE;
use crate::domain::{DomainError, Note};
use crate::ports::confirm::ConfirmPrompt;
use crate::util::text::{excerpt, format_updated};
use chrono::Local;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt;
use tracing::{debug, instrument, trace};

pub const ITEM_CLASS: &str = "notes__list-item";
pub const SELECTED_CLASS: &str = "notes__list-item--selected";

const TITLE_PLACEHOLDER: &str = "New note...";
const INITIAL_BODY: &str = "Take note...";

type IdCallback = Box<dyn FnMut(&str)>;

/// Interaction callbacks; any left unset is a no-op.
///
/// Ids are passed exactly as they appear in the row's `data-note-id`.
pub struct ViewCallbacks {
    on_select: IdCallback,
    on_add: Box<dyn FnMut()>,
    on_edit: Box<dyn FnMut(&str, &str)>,
    on_delete: IdCallback,
}

impl ViewCallbacks {
    pub fn on_select(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Box::new(f);
        self
    }

    pub fn on_add(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_add = Box::new(f);
        self
    }

    /// Receives the trimmed title and body.
    pub fn on_edit(mut self, f: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_edit = Box::new(f);
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_delete = Box::new(f);
        self
    }
}

impl Default for ViewCallbacks {
    fn default() -> Self {
        Self {
            on_select: Box::new(|_| {}),
            on_add: Box::new(|| {}),
            on_edit: Box::new(|_, _| {}),
            on_delete: Box::new(|_| {}),
        }
    }
}

/// A user gesture on the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    ClickAdd,
    BlurTitle,
    BlurBody,
    ClickRow(String),
    DoubleClickRow(String),
}

/// One rendered sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub note_id: String,
    pub title: String,
    pub excerpt: String,
    pub updated_label: String,
    pub selected: bool,
}

impl ListRow {
    fn from_note(note: &Note) -> Self {
        Self {
            note_id: note.id.to_string(),
            title: note.title.clone(),
            excerpt: excerpt(&note.body),
            updated_label: format_updated(&note.updated, &Local),
            selected: false,
        }
    }
}

pub struct ListView {
    root_id: String,
    callbacks: ViewCallbacks,
    prompt: Box<dyn ConfirmPrompt>,
    rows: Vec<ListRow>,
    title_value: String,
    body_value: String,
    preview_visible: bool,
}

impl ListView {
    /// Mount the static skeleton under `root_id`. The preview pane starts hidden.
    pub fn new(
        root_id: impl Into<String>,
        callbacks: ViewCallbacks,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Self {
        let root_id = root_id.into();
        debug!(%root_id, "Mounting list view");
        Self {
            root_id,
            callbacks,
            prompt,
            rows: Vec::new(),
            title_value: String::new(),
            body_value: INITIAL_BODY.to_string(),
            preview_visible: false,
        }
    }

    /// Replace all rows with `notes`, in the order given.
    #[instrument(level = "debug", skip_all, fields(count = notes.len()))]
    pub fn render_list(&mut self, notes: &[Note]) {
        self.rows = notes.iter().map(ListRow::from_note).collect();
    }

    /// Fill the editor from `note` and mark its row as the only selected one.
    ///
    /// Fails with `RowNotFound`, leaving the view untouched, if `note` is not
    /// among the rendered rows.
    #[instrument(level = "debug", skip_all, fields(note_id = note.id))]
    pub fn render_active(&mut self, note: &Note) -> Result<(), DomainError> {
        let id = note.id.to_string();
        let index = self.row_index(&id)?;

        self.title_value = note.title.clone();
        self.body_value = note.body.clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.selected = i == index;
        }
        Ok(())
    }

    pub fn set_preview_visible(&mut self, visible: bool) {
        trace!(visible, "Preview visibility");
        self.preview_visible = visible;
    }

    /// Simulate typing into the title field.
    pub fn set_title_value(&mut self, value: impl Into<String>) {
        self.title_value = value.into();
    }

    /// Simulate typing into the body field.
    pub fn set_body_value(&mut self, value: impl Into<String>) {
        self.body_value = value.into();
    }

    /// Dispatch a gesture to the matching callback.
    ///
    /// Row gestures naming an id that is not rendered fail with `RowNotFound`
    /// and invoke nothing. A declined delete confirmation is not an error.
    #[instrument(level = "debug", skip(self))]
    pub fn handle(&mut self, gesture: Gesture) -> Result<(), DomainError> {
        match gesture {
            Gesture::ClickAdd => (self.callbacks.on_add)(),
            Gesture::BlurTitle | Gesture::BlurBody => {
                let title = self.title_value.trim().to_string();
                let body = self.body_value.trim().to_string();
                (self.callbacks.on_edit)(&title, &body);
            }
            Gesture::ClickRow(id) => {
                self.row_index(&id)?;
                (self.callbacks.on_select)(&id);
            }
            Gesture::DoubleClickRow(id) => {
                self.row_index(&id)?;
                if self.prompt.confirm(DELETE_CONFIRM_MESSAGE) {
                    (self.callbacks.on_delete)(&id);
                } else {
                    debug!(note_id = %id, "Delete declined");
                }
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn title_value(&self) -> &str {
        &self.title_value
    }

    pub fn body_value(&self) -> &str {
        &self.body_value
    }

    pub fn is_preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn selected_note_id(&self) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.selected)
            .map(|row| row.note_id.as_str())
    }

    /// Markup of the whole mounted subtree.
    pub fn html(&self) -> String {
        let mut out = format!(
            "<div id=\"{}\" class=\"notes\">\n",
            encode_double_quoted_attribute(&self.root_id)
        );
        out.push_str("  <div class=\"notes__sidebar\">\n");
        out.push_str("    <button class=\"notes__add\" type=\"button\">Add Note</button>\n");
        out.push_str("    <div class=\"notes__list\">\n");
        for row in &self.rows {
            out.push_str(&row_html(row));
        }
        out.push_str("    </div>\n");
        out.push_str("  </div>\n");

        let visibility = if self.preview_visible { "visible" } else { "hidden" };
        out.push_str(&format!(
            "  <div class=\"notes__preview\" style=\"visibility: {}\">\n",
            visibility
        ));
        out.push_str(&format!(
            "    <input class=\"notes__title\" type=\"text\" placeholder=\"{}\" value=\"{}\">\n",
            TITLE_PLACEHOLDER,
            encode_double_quoted_attribute(&self.title_value)
        ));
        out.push_str(&format!(
            "    <textarea class=\"notes__body\">{}</textarea>\n",
            encode_text(&self.body_value)
        ));
        out.push_str("  </div>\n");
        out.push_str("</div>\n");
        out
    }

    fn row_index(&self, id: &str) -> Result<usize, DomainError> {
        self.rows
            .iter()
            .position(|row| row.note_id == id)
            .ok_or_else(|| DomainError::RowNotFound(id.to_string()))
    }
}

fn row_html(row: &ListRow) -> String {
    let class = if row.selected {
        format!("{} {}", ITEM_CLASS, SELECTED_CLASS)
    } else {
        ITEM_CLASS.to_string()
    };
    format!(
        concat!(
            "      <div class=\"{}\" data-note-id=\"{}\">\n",
            "        <div class=\"notes__small-title\">{}</div>\n",
            "        <div class=\"notes__small-body\">{}</div>\n",
            "        <div class=\"notes__small-updated\">{}</div>\n",
            "      </div>\n",
        ),
        class,
        encode_double_quoted_attribute(&row.note_id),
        encode_text(&row.title),
        encode_text(&row.excerpt),
        encode_text(&row.updated_label),
    )
}

impl fmt::Debug for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("root_id", &self.root_id)
            .field("rows", &self.rows)
            .field("title_value", &self.title_value)
            .field("body_value", &self.body_value)
            .field("preview_visible", &self.preview_visible)
            .finish_non_exhaustive()
    }
}
