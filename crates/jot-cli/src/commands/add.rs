use jot_core::Note;

use crate::commands::common::{parse_note_type, parse_reminder, resolve_note_content};
use crate::error::CliError;
use crate::store::LocalStore;

pub fn run_add(
    content_parts: &[String],
    kind: Option<&str>,
    remind: Option<&str>,
    store: &LocalStore,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let mut note = Note::new(content);
    if let Some(label) = kind {
        note.note_type = parse_note_type(label)?;
    }
    if let Some(raw) = remind {
        note.reminder_at = Some(parse_reminder(raw)?);
    }

    let mut data = store.load()?;
    data.notes.insert(0, note.clone());
    store.save(&data)?;

    println!("{}", note.id);
    Ok(())
}
