//! Collection controller
//!
//! Owns the canonical record list and persists it after every mutation.
//! Persistence failures are logged and swallowed: the in-memory
//! collection stays the source of truth for the running session.

use chrono::Utc;
use uuid::Uuid;
use vault_store::{CollectionStore, Result, VinylDraft, VinylRecord};

/// Owner of the in-memory collection
pub struct CollectionController {
    records: Vec<VinylRecord>,
    store: CollectionStore,
}

impl CollectionController {
    /// Load the collection through the store (seeding or migrating as
    /// needed)
    pub fn load(store: CollectionStore) -> Result<Self> {
        let records = store.load()?;
        tracing::info!(count = records.len(), "Collection loaded");
        Ok(Self { records, store })
    }

    pub fn records(&self) -> &[VinylRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VinylRecord> {
        self.records.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Add a new record from a draft; newest records go to the front.
    /// Returns the generated id.
    pub fn add(&mut self, draft: VinylDraft) -> String {
        let id = Uuid::new_v4().to_string();
        let record = VinylRecord::from_draft(draft, id.clone(), Utc::now().timestamp_millis());
        self.records.insert(0, record);
        self.persist();
        id
    }

    /// Replace the editable fields of the record with the given id.
    /// Returns false if no such record exists.
    pub fn update(&mut self, id: &str, draft: VinylDraft) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        record.apply_draft(draft);
        self.persist();
        true
    }

    /// Remove the record with the given id
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Replace the whole collection (backup import, shelf reorder)
    pub fn replace_all(&mut self, records: Vec<VinylRecord>) {
        self.records = records;
        self.persist();
    }

    /// Export the collection as a pretty-printed JSON array
    pub fn export(&self) -> Result<String> {
        self.store.export(&self.records)
    }

    /// Parse a backup file; the caller decides whether to apply it via
    /// [`Self::replace_all`]
    pub fn parse_import(&self, raw: &[u8]) -> Result<Vec<VinylRecord>> {
        self.store.import(raw)
    }

    fn persist(&self) {
        // Write failures must not block the session; warn and move on.
        if let Err(e) = self.store.save(&self.records) {
            tracing::warn!("Failed to persist collection: {}", e);
        }
    }
}
