//! Local note persistence.
//!
//! The client is offline-first: notes live in a single JSON file in the
//! platform data directory (or wherever `--data-path` points) and only touch
//! the network on explicit sync or analyze actions. The local collection and
//! the server copy may diverge between syncs by design.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jot_core::Note;

use crate::error::CliError;

/// Everything the client persists: the note list and the sync code, if one
/// has been set up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalData {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_code: Option<String>,
}

impl LocalData {
    /// Find the index of a note by exact id or unique id prefix.
    pub fn find_note(&self, id_or_prefix: &str) -> Result<usize, CliError> {
        if let Some(index) = self.notes.iter().position(|note| note.id == id_or_prefix) {
            return Ok(index);
        }

        let matches: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.id.starts_with(id_or_prefix))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [index] => Ok(*index),
            [] => Err(CliError::NoteNotFound(id_or_prefix.to_string())),
            _ => Err(CliError::AmbiguousNoteId(format!(
                "Prefix '{id_or_prefix}' matches {} notes; give more characters",
                matches.len()
            ))),
        }
    }
}

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<platform data dir>/jot/notes.json`.
    pub fn default_path() -> Result<PathBuf, CliError> {
        let base = dirs::data_dir().ok_or(CliError::NoDataDir)?;
        Ok(base.join("jot").join("notes.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the local data; a missing file is an empty collection.
    pub fn load(&self) -> Result<LocalData, CliError> {
        if !self.path.exists() {
            return Ok(LocalData::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, data: &LocalData) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
