//! GrooveVault Persistence Layer
//!
//! Provides:
//! - Versioned load/save of the vinyl collection (JSON blob + version file)
//! - Schema migration by template merge
//! - Export/import of backup files

mod migrate;
mod record;
mod store;
mod template;

pub use migrate::{migrate_collection, CURRENT_VERSION};
pub use record::{MediaKind, MediaRef, VinylDraft, VinylRecord};
pub use store::{export_collection, import_collection, CollectionStore};
pub use template::template_collection;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid backup file: expected a JSON array of records")]
    ImportInvalid,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Get the default store directory
pub fn store_dir() -> PathBuf {
    ProjectDirs::from("com", "GrooveVault", "GrooveVault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
