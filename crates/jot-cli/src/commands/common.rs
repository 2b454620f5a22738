use chrono::{DateTime, Utc};
use serde::Serialize;

use jot_core::{Note, NoteType};

use crate::error::CliError;

/// Join command-line words into note content, rejecting empty input.
pub fn resolve_note_content(parts: &[String]) -> Result<String, CliError> {
    let content = parts.join(" ").trim().to_string();
    if content.is_empty() {
        return Err(CliError::EmptyContent);
    }
    Ok(content)
}

pub fn parse_note_type(label: &str) -> Result<NoteType, CliError> {
    NoteType::from_label(label).ok_or_else(|| CliError::UnknownNoteType(label.to_string()))
}

pub fn parse_reminder(raw: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|when| when.with_timezone(&Utc))
        .map_err(|_| CliError::InvalidReminder(raw.to_string()))
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub preview: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: String,
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<String>,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.clone(),
        preview: note.title_preview(60),
        content: note.content.clone(),
        note_type: note.note_type.to_string(),
        tags: note.tags.clone(),
        created_at: note.created_at.to_rfc3339(),
        reminder_at: note.reminder_at.map(|when| when.to_rfc3339()),
    }
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let short_id: String = note.id.chars().take(8).collect();
            let date = note.created_at.format("%Y-%m-%d %H:%M");
            let mut line = format!(
                "{short_id}  {:<9}  {date}  {}",
                note.note_type,
                note.title_preview(60)
            );
            if !note.tags.is_empty() {
                let tags: Vec<String> = note.tags.iter().map(|tag| format!("#{tag}")).collect();
                line.push_str(&format!("  [{}]", tags.join(" ")));
            }
            line
        })
        .collect()
}

/// Merge classifier tags into a note's tags, keeping order and skipping
/// duplicates case-insensitively.
pub fn merge_tags(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = existing.to_vec();
    for tag in incoming {
        if !merged.iter().any(|known| known.eq_ignore_ascii_case(tag)) {
            merged.push(tag.clone());
        }
    }
    merged
}
