//! Recommendation service boundary
//!
//! The AI service itself is an external collaborator: given a query and a
//! context string derived from the user's collection, it returns
//! structured recommendation records or fails with a generic connectivity
//! error. This module owns the context derivation and the trait seam; no
//! network code lives in this crate.

use crate::error::VaultError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vault_store::VinylRecord;

/// Ratings at or above this mark a record as a favorite for context
const CONTEXT_RATING_FLOOR: u8 = 4;
/// At most this many favorites are sent
const CONTEXT_LIMIT: usize = 5;

/// One recommendation returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub album: String,
    pub artist: String,
    pub year: String,
    pub genre: String,
    /// Why this fits the request
    pub reason: String,
}

/// External recommendation service seam
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(
        &self,
        query: &str,
        context: &str,
    ) -> Result<Vec<Recommendation>, VaultError>;
}

/// Derive the context string sent with every query: up to five top-rated
/// records as "Title by Artist", or a fixed placeholder for new
/// collectors.
pub fn listening_context(records: &[VinylRecord]) -> String {
    let favorites: Vec<String> = records
        .iter()
        .filter(|r| r.rating >= CONTEXT_RATING_FLOOR)
        .map(|r| format!("{} by {}", r.title, r.artist))
        .take(CONTEXT_LIMIT)
        .collect();

    if favorites.is_empty() {
        "User is new to collecting.".to_string()
    } else {
        format!("User likes: {}", favorites.join(", "))
    }
}
