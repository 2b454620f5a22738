use jot_core::merge_notes;

use crate::api::ApiClient;
use crate::error::CliError;
use crate::store::LocalStore;

pub async fn run_setup(store: &LocalStore, api: &ApiClient) -> Result<(), CliError> {
    let mut data = store.load()?;
    if let Some(code) = &data.sync_code {
        println!("Replacing existing sync code {code}");
    }

    let created = api.create_sync_code().await?;
    data.sync_code = Some(created.sync_code.clone());
    store.save(&data)?;

    println!("Sync code: {}", created.sync_code);
    println!("Share this code to pull the same notes on another device.");
    Ok(())
}

pub async fn run_push(store: &LocalStore, api: &ApiClient) -> Result<(), CliError> {
    let mut data = store.load()?;
    let code = data.sync_code.clone().ok_or(CliError::SyncNotConfigured)?;

    let pushed = api.push_notes(&code, &data.notes).await?;
    // The server replies with the merged collection; adopt it wholesale.
    data.notes = pushed.notes;
    store.save(&data)?;

    println!("Synced {} notes", pushed.sync_count);
    Ok(())
}

pub async fn run_pull(store: &LocalStore, api: &ApiClient) -> Result<(), CliError> {
    let mut data = store.load()?;
    let code = data.sync_code.clone().ok_or(CliError::SyncNotConfigured)?;

    let fetched = api.fetch_notes(&code).await?;
    data.notes = merge_notes(&fetched.notes, &data.notes);
    store.save(&data)?;

    println!(
        "Pulled {} remote notes; {} notes locally after merge",
        fetched.notes.len(),
        data.notes.len()
    );
    Ok(())
}

pub fn run_status(store: &LocalStore, api: &ApiClient) -> Result<(), CliError> {
    let data = store.load()?;
    match &data.sync_code {
        Some(code) => println!("Sync code: {code}"),
        None => println!("Sync code: not configured (run `jot sync setup`)"),
    }
    println!("API URL:   {}", api.base_url());
    println!("Notes:     {}", data.notes.len());
    Ok(())
}
