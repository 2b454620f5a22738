use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jot_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API request failed: {0}")]
    Api(String),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Unknown note type: {0} (expected idea, complaint, confusion, news, or link)")]
    UnknownNoteType(String),
    #[error("Invalid reminder time: {0} (expected RFC 3339, e.g. 2024-06-01T09:00:00Z)")]
    InvalidReminder(String),
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Could not determine a data directory; pass --data-path")]
    NoDataDir,
    #[error("Sync is not configured. Run `jot sync setup` first.")]
    SyncNotConfigured,
}
