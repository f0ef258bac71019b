//! Schema migration by template merge
//!
//! The stored blob carries no version metadata itself; an integer version
//! lives alongside it. When the stored version lags behind
//! [`CURRENT_VERSION`], each stored record that matches a template record
//! by id is rebuilt on top of the template: the template supplies fields
//! introduced after the record was saved, then every field actually
//! present on the stored record overlays it, so user edits always win.
//! User-created records with no template counterpart pass through as-is.
//!
//! Migration runs on raw JSON objects rather than typed records so that
//! unknown keys written by older releases survive the merge.

use crate::VinylRecord;
use serde_json::{Map, Value};

/// Bump whenever the shape of the template dataset changes significantly,
/// so existing installs get the new fields merged into their saved data.
pub const CURRENT_VERSION: u32 = 2;

/// Migrate a stored collection against the template dataset.
pub fn migrate_collection(stored: Vec<Value>, template: &[VinylRecord]) -> Vec<Value> {
    stored
        .into_iter()
        .map(|record| migrate_record(record, template))
        .collect()
}

fn migrate_record(stored: Value, template: &[VinylRecord]) -> Value {
    let Value::Object(stored_map) = stored else {
        // Not an object; nothing sensible to merge
        return stored;
    };

    let stored_id = stored_map.get("id").and_then(Value::as_str);
    let fresh = stored_id.and_then(|id| template.iter().find(|t| t.id == id));

    match fresh {
        Some(fresh) => {
            // Template first, stored fields overlaid on top
            let mut merged = match serde_json::to_value(fresh) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            };
            for (key, value) in stored_map {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        None => Value::Object(stored_map),
    }
}
