use crate::error::CliError;
use crate::store::LocalStore;

pub fn run_delete(id_or_prefix: &str, store: &LocalStore) -> Result<(), CliError> {
    let mut data = store.load()?;
    let index = data.find_note(id_or_prefix)?;
    let removed = data.notes.remove(index);
    store.save(&data)?;

    println!("Deleted {}", removed.id);
    Ok(())
}
