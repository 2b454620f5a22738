use crate::api::ApiClient;
use crate::commands::common::merge_tags;
use crate::error::CliError;
use crate::store::LocalStore;

pub async fn run_analyze(
    id_or_prefix: &str,
    store: &LocalStore,
    api: &ApiClient,
) -> Result<(), CliError> {
    let mut data = store.load()?;
    let index = data.find_note(id_or_prefix)?;

    let analysis = api.analyze(&data.notes[index].content).await?;

    let note = &mut data.notes[index];
    note.note_type = analysis.note_type;
    note.tags = merge_tags(&note.tags, &analysis.tags);
    note.ai_type_reason = Some(analysis.type_reason.clone());
    note.ai_suggestion = Some(analysis.suggestions.clone());
    note.is_ai_analyzed = Some(true);
    store.save(&data)?;

    println!("type:       {}", analysis.note_type);
    println!("reason:     {}", analysis.type_reason);
    if !analysis.tags.is_empty() {
        println!("tags:       {}", analysis.tags.join(", "));
    }
    println!("suggestion: {}", analysis.suggestions);
    Ok(())
}
