use crate::commands::common::{
    format_note_lines, note_to_list_item, parse_note_type, NoteListItem,
};
use crate::error::CliError;
use crate::store::LocalStore;

pub fn run_list(
    limit: usize,
    tag: Option<&str>,
    kind: Option<&str>,
    as_json: bool,
    store: &LocalStore,
) -> Result<(), CliError> {
    let type_filter = kind.map(parse_note_type).transpose()?;

    let data = store.load()?;
    let mut notes = data.notes;
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let notes: Vec<_> = notes
        .into_iter()
        .filter(|note| tag.is_none_or(|tag| note.has_tag(tag)))
        .filter(|note| type_filter.is_none_or(|wanted| note.note_type == wanted))
        .take(limit)
        .collect();

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes yet. Try: jot add \"my first note\"");
        return Ok(());
    }

    for line in format_note_lines(&notes) {
        println!("{line}");
    }
    Ok(())
}
