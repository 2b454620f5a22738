use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "Capture short notes, classify them, and sync them with a shareable code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local notes file
    #[arg(long, global = true, value_name = "PATH")]
    pub data_path: Option<PathBuf>,

    /// Base URL of the jot-api server (default: JOT_API_URL or http://127.0.0.1:8080)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note content
        content: Vec<String>,
        /// Note type: idea, complaint, confusion, news, or link
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Reminder time (RFC 3339)
        #[arg(long, value_name = "WHEN")]
        remind: Option<String>,
    },
    /// List recent notes
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Filter notes by tag name
        #[arg(long)]
        tag: Option<String>,
        /// Filter notes by type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Show notes with due or upcoming reminders
    Reminders,
    /// Classify a note via the API and store the result
    Analyze {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Sync notes with the server
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Request a fresh sync code and remember it
    Setup,
    /// Push local notes and adopt the merged collection
    Push,
    /// Fetch remote notes and merge them into the local collection
    Pull,
    /// Show the configured sync code and API URL
    Status,
}
