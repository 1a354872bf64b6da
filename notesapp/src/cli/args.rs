// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to a TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the note storage (overrides the config)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes, most recently updated first
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new note
    Add {
        /// Title of the new note
        #[arg(short, long)]
        title: Option<String>,

        /// Body of the new note
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Edit the title and/or body of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Delete a note after confirmation
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace all notes with the two sample notes
    Reset,

    /// Render the notes page and open it in the browser
    Show {
        /// Note ID to show as selected
        #[arg(long, value_name = "NOTE_ID")]
        select: Option<i64>,

        /// Print the HTML instead of opening the browser
        #[arg(long)]
        stdout: bool,
    },
}
