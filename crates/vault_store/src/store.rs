//! Versioned collection store
//!
//! The on-disk layout mirrors the two-key model of the original data:
//! `collection.json` holds a bare JSON array of records and `version`
//! holds a bare integer. The version deliberately lives next to the blob
//! rather than inside it, and is never included in exports.

use crate::{
    migrate_collection, template_collection, Result, StoreError, VinylRecord, CURRENT_VERSION,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const COLLECTION_FILE: &str = "collection.json";
const VERSION_FILE: &str = "version";

/// Durable store for the vinyl collection
pub struct CollectionStore {
    root: PathBuf,
}

impl CollectionStore {
    /// Open a store rooted at the given directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store at the default application data directory
    pub fn open_default() -> Result<Self> {
        Self::open(crate::store_dir())
    }

    fn collection_path(&self) -> PathBuf {
        self.root.join(COLLECTION_FILE)
    }

    fn version_path(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }

    /// Load the collection, seeding or migrating as needed.
    ///
    /// - First run (no blob): seed with the template dataset.
    /// - Unparseable blob: silent reset to the template dataset.
    /// - Stored version behind [`CURRENT_VERSION`]: merge against the
    ///   template, persist the result, bump the version.
    pub fn load(&self) -> Result<Vec<VinylRecord>> {
        let path = self.collection_path();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No stored collection, seeding template dataset");
                return self.reset_to_template();
            }
            Err(e) => return Err(e.into()),
        };

        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(Value::Array(values)) => values,
            Ok(_) | Err(_) => {
                tracing::warn!("Stored collection is corrupt, resetting to template");
                return self.reset_to_template();
            }
        };

        let stored_version = self.stored_version();
        if stored_version < CURRENT_VERSION {
            tracing::info!(
                from = stored_version,
                to = CURRENT_VERSION,
                "Migrating stored collection"
            );
            let migrated = migrate_collection(values, &template_collection());
            let records: Vec<VinylRecord> = match serde_json::from_value(Value::Array(migrated)) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Migrated collection failed to decode ({}), resetting", e);
                    return self.reset_to_template();
                }
            };
            self.save(&records)?;
            return Ok(records);
        }

        match serde_json::from_value(Value::Array(values)) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!("Stored collection failed to decode ({}), resetting", e);
                self.reset_to_template()
            }
        }
    }

    /// Overwrite the stored collection at the current version
    pub fn save(&self, records: &[VinylRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        fs::write(self.collection_path(), json)?;
        fs::write(self.version_path(), CURRENT_VERSION.to_string())?;
        tracing::debug!(count = records.len(), "Collection saved");
        Ok(())
    }

    fn reset_to_template(&self) -> Result<Vec<VinylRecord>> {
        let records = template_collection();
        self.save(&records)?;
        Ok(records)
    }

    fn stored_version(&self) -> u32 {
        fs::read_to_string(self.version_path())
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// Serialize a collection as an indented JSON array for external backup.
/// No wrapper object and no version field.
pub fn export_collection(records: &[VinylRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a backup file. Accepts only a top-level JSON array; the caller
/// replaces the working collection wholesale on success.
pub fn import_collection(raw: &[u8]) -> Result<Vec<VinylRecord>> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| StoreError::ImportInvalid)?;
    if !value.is_array() {
        return Err(StoreError::ImportInvalid);
    }
    serde_json::from_value(value).map_err(|_| StoreError::ImportInvalid)
}

impl CollectionStore {
    /// See [`export_collection`]
    pub fn export(&self, records: &[VinylRecord]) -> Result<String> {
        export_collection(records)
    }

    /// See [`import_collection`]
    pub fn import(&self, raw: &[u8]) -> Result<Vec<VinylRecord>> {
        import_collection(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_seeds_template() {
        let dir = tempdir().unwrap();
        let store = CollectionStore::open(dir.path()).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records, template_collection_ids(&records));
        assert!(dir.path().join("collection.json").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("version")).unwrap(),
            CURRENT_VERSION.to_string()
        );
    }

    // Template timestamps are generated at call time, so compare against
    // the loaded records themselves where times matter.
    fn template_collection_ids(loaded: &[VinylRecord]) -> Vec<VinylRecord> {
        let mut template = template_collection();
        for (t, l) in template.iter_mut().zip(loaded) {
            t.added_at = l.added_at;
        }
        template
    }

    #[test]
    fn test_corrupt_blob_resets_to_template() {
        let dir = tempdir().unwrap();
        let store = CollectionStore::open(dir.path()).unwrap();

        fs::write(dir.path().join("collection.json"), "{not valid json").unwrap();
        fs::write(dir.path().join("version"), "2").unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), template_collection().len());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = CollectionStore::open(dir.path()).unwrap();

        let mut records = store.load().unwrap();
        records[0].rating = 2;
        records[0].notes = Some("resleeved".into());
        store.save(&records).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, records);
    }

    #[test]
    fn test_outdated_version_triggers_migration() {
        let dir = tempdir().unwrap();
        let store = CollectionStore::open(dir.path()).unwrap();

        // A v1-era blob: template record missing newer fields, plus a
        // user-created record.
        let legacy = json!([
            {
                "id": "1",
                "title": "Dark Side of the Moon",
                "artist": "Pink Floyd",
                "year": 1973,
                "genre": "Progressive Rock",
                "rating": 3,
                "addedAt": 100
            },
            {
                "id": "mine",
                "title": "Homework",
                "artist": "Daft Punk",
                "year": 1997,
                "genre": "Electronic",
                "rating": 4,
                "addedAt": 200
            }
        ]);
        fs::write(
            dir.path().join("collection.json"),
            serde_json::to_string(&legacy).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("version"), "1").unwrap();

        let records = store.load().unwrap();
        // User edits kept, new schema fields merged in from the template
        assert_eq!(records[0].rating, 3);
        assert_eq!(records[0].added_at, 100);
        assert!(records[0].tracks_side_a.is_some());
        // Unmatched record untouched
        assert_eq!(records[1].id, "mine");
        assert!(records[1].tracks_side_a.is_none());

        // Version bumped: loading again is a no-op migration
        let again = store.load().unwrap();
        assert_eq!(again, records);
    }

    #[test]
    fn test_import_rejects_non_array() {
        assert!(matches!(
            import_collection(br#"{"items": []}"#),
            Err(StoreError::ImportInvalid)
        ));
        assert!(matches!(
            import_collection(b"not json at all"),
            Err(StoreError::ImportInvalid)
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let records = template_collection();
        let exported = export_collection(&records).unwrap();
        // Pretty-printed array, no wrapper object
        assert!(exported.trim_start().starts_with('['));
        assert!(!exported.contains("schemaVersion"));

        let imported = import_collection(exported.as_bytes()).unwrap();
        assert_eq!(imported, records);
    }
}
