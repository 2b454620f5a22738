//! Jot CLI - offline-first note client
//!
//! Notes live in a local JSON file; sync and classification reach out to a
//! running jot-api server only when explicitly asked to.

mod api;
mod cli;
mod commands;
mod error;
mod store;

use clap::Parser;

use api::ApiClient;
use cli::{Cli, Commands, SyncCommands};
use error::CliError;
use store::LocalStore;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = match &cli.data_path {
        Some(path) => LocalStore::new(path),
        None => LocalStore::new(LocalStore::default_path()?),
    };

    match cli.command {
        Commands::Add {
            content,
            kind,
            remind,
        } => commands::add::run_add(&content, kind.as_deref(), remind.as_deref(), &store),
        Commands::List {
            limit,
            tag,
            kind,
            json,
        } => commands::list::run_list(limit, tag.as_deref(), kind.as_deref(), json, &store),
        Commands::Delete { id } => commands::delete::run_delete(&id, &store),
        Commands::Reminders => commands::remind::run_reminders(&store),
        Commands::Analyze { id } => {
            let api = api_client(cli.api_url)?;
            commands::analyze::run_analyze(&id, &store, &api).await
        }
        Commands::Sync { command } => {
            let api = api_client(cli.api_url)?;
            match command {
                SyncCommands::Setup => commands::sync::run_setup(&store, &api).await,
                SyncCommands::Push => commands::sync::run_push(&store, &api).await,
                SyncCommands::Pull => commands::sync::run_pull(&store, &api).await,
                SyncCommands::Status => commands::sync::run_status(&store, &api),
            }
        }
    }
}

fn api_client(flag: Option<String>) -> Result<ApiClient, CliError> {
    let base_url = flag
        .or_else(|| std::env::var("JOT_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    ApiClient::new(base_url)
}
