// src/constants.rs
//
// Application-wide constants shared by the store, the list view and the CLI.

/// Storage key holding the JSON array of notes.
///
/// Used in: `infrastructure/record_store.rs`, `infrastructure/config.rs`
pub const DEFAULT_STORAGE_KEY: &str = "notesapp-notes";

/// Maximum number of characters of a note body shown in a sidebar row.
///
/// Longer bodies are cut to exactly this many characters followed by
/// `EXCERPT_ELLIPSIS`.
///
/// Used in: `util/text.rs`
pub const EXCERPT_MAX_CHARS: usize = 60;

pub const EXCERPT_ELLIPSIS: &str = "...";

/// Message shown before a double-click deletes a note.
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you wish to delete this note?";

/// Title and body given to a note created from the "Add Note" button.
pub const NEW_NOTE_TITLE: &str = "New Note";
pub const NEW_NOTE_BODY: &str = "Take note...";

/// Notes written by a reset, in insertion order.
pub const SAMPLE_NOTES: [(&str, &str); 2] = [
    ("Hello! I'm a note", "Feel free to edit me!"),
    (
        "Yeah, I'm another note!",
        "Don't leave me out, feel free to edit me as well!",
    ),
];

/// Mount element id used when none is configured.
pub const DEFAULT_ROOT_ID: &str = "app";

/// Page title used when none is configured.
///
/// Used in: `infrastructure/config.rs`, `ports/html.rs`
pub const DEFAULT_PAGE_TITLE: &str = "Notes";

/// Delay in milliseconds after spawning the browser before returning.
///
/// The rendered page lives in a temp directory owned by the process; the
/// browser needs a moment to read it before that directory can go away.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
