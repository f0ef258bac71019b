//! GrooveVault - Personal Vinyl Collection Browser
//!
//! Main entry point.

mod app;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use vault_core::{AppConfig, CollectionController, FsCoverSource, Session};
use vault_store::CollectionStore;

#[derive(Parser)]
#[command(name = "groove_vault", about = "Personal vinyl collection browser", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive browse session (default)
    Browse,
    /// Print the collection, newest first
    List {
        /// Case-insensitive match against title or artist
        #[arg(long)]
        search: Option<String>,
        /// Exact genre filter
        #[arg(long)]
        genre: Option<String>,
    },
    /// Print collection statistics
    Stats,
    /// Write the collection to a backup file
    Export { file: PathBuf },
    /// Replace the collection from a backup file
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    // Logging and panic hook first
    vault_log::init()?;

    if let Err(e) = vault_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("GrooveVault starting...");

    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_default();

    let store = CollectionStore::open_default()?;
    let controller = CollectionController::load(store)?;
    let mut session = Session::new(controller, config, Arc::new(FsCoverSource));

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => app::run(&mut session),
        Command::List { search, genre } => {
            app::list(&session, search.as_deref().unwrap_or(""), genre.as_deref())
        }
        Command::Stats => app::stats(&session),
        Command::Export { file } => app::export(&session, &file),
        Command::Import { file } => app::import(&mut session, &file),
    }
}
