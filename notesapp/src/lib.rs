// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::NotesApp;
use infrastructure::{Config, ContentRenderer, DirStorage, RecordStore};
use ports::{AssumeYes, ConfirmPrompt, Gesture, HtmlPresenter, LinePrompt};
use tracing::{debug, info};
use crate::cli::args::{Args, Command};

type App = NotesApp<RecordStore<DirStorage>>;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesapp with arguments");

    // Initialize infrastructure
    let config = Config::load_or_default(args.config.as_deref())?;
    let storage_dir = config.storage_dir(args.storage_dir.as_deref())?;
    debug!(?storage_dir, key = %config.storage.key, "Using note storage");
    let mut store = RecordStore::with_key(DirStorage::new(&storage_dir), &config.storage.key);

    // Commands other than list/reset go through the list view, exactly as a
    // user's gestures would.
    let open = |store: RecordStore<DirStorage>, prompt: Box<dyn ConfirmPrompt>| -> Result<App> {
        Ok(NotesApp::new(store, &config.view.root_id, prompt)?)
    };

    match args.command {
        Command::List { json } => list_notes(&store, json),
        Command::Reset => {
            let notes = store.reset_to_sample()?;
            println!("Reset to {} sample notes", notes.len());
            Ok(())
        }
        Command::Add { title, body } => {
            let mut app = open(store, Box::new(LinePrompt::stdio()))?;
            add_note(&mut app, title, body)
        }
        Command::Edit { note_id, title, body } => {
            let mut app = open(store, Box::new(LinePrompt::stdio()))?;
            edit_note(&mut app, note_id, title, body)
        }
        Command::Delete { note_id, yes } => {
            let prompt: Box<dyn ConfirmPrompt> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(LinePrompt::stdio())
            };
            let mut app = open(store, prompt)?;
            delete_note(&mut app, note_id)
        }
        Command::Show { select: selected, stdout } => {
            let mut app = open(store, Box::new(LinePrompt::stdio()))?;
            show_notes(&mut app, &config.view.title, selected, stdout)
        }
    }
}

fn list_notes(store: &RecordStore<DirStorage>, json: bool) -> Result<()> {
    let notes = store.list_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }
    if notes.is_empty() {
        println!("No notes");
        return Ok(());
    }
    for note in &notes {
        println!(
            "{:>6}  {}  {}",
            note.id,
            note.updated.format("%Y-%m-%d %H:%M"),
            note.title
        );
    }
    Ok(())
}

fn add_note(app: &mut App, title: Option<String>, body: Option<String>) -> Result<()> {
    app.dispatch(Gesture::ClickAdd)?;
    let id = app
        .active_note()
        .map(|note| note.id)
        .context("New note was not selected")?;
    if title.is_some() || body.is_some() {
        edit_active(app, title, body)?;
    }
    info!(note_id = id, "Added note");
    println!("Added note {}", id);
    Ok(())
}

fn edit_note(
    app: &mut App,
    note_id: i64,
    title: Option<String>,
    body: Option<String>,
) -> Result<()> {
    if title.is_none() && body.is_none() {
        bail!("Nothing to edit: pass --title and/or --body");
    }
    select(app, note_id)?;
    edit_active(app, title, body)?;
    println!("Updated note {}", note_id);
    Ok(())
}

fn delete_note(app: &mut App, note_id: i64) -> Result<()> {
    app.dispatch(Gesture::DoubleClickRow(note_id.to_string()))
        .with_context(|| format!("Cannot delete note {}", note_id))?;
    if app.notes().iter().any(|note| note.id == note_id) {
        println!("Kept note {}", note_id);
    } else {
        println!("Deleted note {}", note_id);
    }
    Ok(())
}

fn show_notes(app: &mut App, title: &str, selected: Option<i64>, stdout: bool) -> Result<()> {
    if let Some(note_id) = selected {
        select(app, note_id)?;
    }
    let html = HtmlPresenter::with_title(title).render(app.view());
    debug!(bytes = html.len(), "Generated HTML");

    if stdout {
        println!("{}", html);
        return Ok(());
    }
    let mut renderer = ContentRenderer::new();
    let path = renderer.create_temp_file(&html)?;
    renderer.open_in_browser(&path)?;
    Ok(())
}

fn select(app: &mut App, note_id: i64) -> Result<()> {
    app.dispatch(Gesture::ClickRow(note_id.to_string()))
        .with_context(|| format!("Note {} not found", note_id))
}

fn edit_active(app: &mut App, title: Option<String>, body: Option<String>) -> Result<()> {
    let view = app.view_mut();
    if let Some(title) = title {
        view.set_title_value(title);
    }
    if let Some(body) = body {
        view.set_body_value(body);
    }
    app.dispatch(Gesture::BlurTitle)?;
    Ok(())
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
