use chrono::Utc;

use jot_core::Note;

use crate::commands::common::format_note_lines;
use crate::error::CliError;
use crate::store::LocalStore;

pub fn run_reminders(store: &LocalStore) -> Result<(), CliError> {
    let data = store.load()?;
    let now = Utc::now();

    let mut with_reminder: Vec<Note> = data
        .notes
        .into_iter()
        .filter(|note| note.reminder_at.is_some())
        .collect();
    with_reminder.sort_by_key(|note| note.reminder_at);

    let (due, upcoming): (Vec<Note>, Vec<Note>) = with_reminder
        .into_iter()
        .partition(|note| note.reminder_at.is_some_and(|when| when <= now));

    if due.is_empty() && upcoming.is_empty() {
        println!("No reminders set.");
        return Ok(());
    }

    if !due.is_empty() {
        println!("Due:");
        for line in format_note_lines(&due) {
            println!("  {line}");
        }
    }
    if !upcoming.is_empty() {
        println!("Upcoming:");
        for line in format_note_lines(&upcoming) {
            println!("  {line}");
        }
    }
    Ok(())
}
