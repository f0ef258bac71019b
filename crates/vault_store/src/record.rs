//! Vinyl record data model

use serde::{Deserialize, Serialize};

/// Valid rating range (inclusive)
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A single vinyl in the collection.
///
/// Field names serialize in camelCase so that backups written by older
/// releases import cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinylRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// 1-5 stars
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Epoch milliseconds at creation time
    pub added_at: i64,
    /// Posters, back covers, inserts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks_side_a: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks_side_b: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_description: Option<String>,
}

/// Every user-editable field of a record. Identity and creation time are
/// owned by the collection, not the edit flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VinylDraft {
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub genre: String,
    pub cover_url: Option<String>,
    pub rating: u8,
    pub notes: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub format: Option<String>,
    pub tracks_side_a: Option<Vec<String>>,
    pub tracks_side_b: Option<Vec<String>>,
    pub archive_description: Option<String>,
}

/// Kind of media asset attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Video,
    Image,
}

/// Reference to one media asset of a record
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub url: String,
}

impl VinylRecord {
    /// Build a record from a draft with the given identity
    pub fn from_draft(draft: VinylDraft, id: String, added_at: i64) -> Self {
        Self {
            id,
            title: draft.title,
            artist: draft.artist,
            year: draft.year,
            genre: draft.genre,
            cover_url: draft.cover_url,
            rating: clamp_rating(draft.rating),
            notes: draft.notes,
            added_at,
            additional_images: draft.additional_images,
            video_url: draft.video_url,
            format: draft.format,
            tracks_side_a: draft.tracks_side_a,
            tracks_side_b: draft.tracks_side_b,
            archive_description: draft.archive_description,
        }
    }

    /// Overwrite every editable field from a draft, keeping id and added_at
    pub fn apply_draft(&mut self, draft: VinylDraft) {
        let id = std::mem::take(&mut self.id);
        let added_at = self.added_at;
        *self = Self::from_draft(draft, id, added_at);
    }

    /// Count of additional images
    pub fn image_count(&self) -> usize {
        self.additional_images.as_ref().map_or(0, Vec::len)
    }

    /// Aggregate all media assets in display order: video, cover,
    /// additional images.
    pub fn media_items(&self) -> Vec<MediaRef> {
        let mut items = Vec::new();

        if let Some(url) = &self.video_url {
            items.push(MediaRef {
                kind: MediaKind::Video,
                url: url.clone(),
            });
        }

        if let Some(url) = &self.cover_url {
            items.push(MediaRef {
                kind: MediaKind::Image,
                url: url.clone(),
            });
        }

        if let Some(images) = &self.additional_images {
            for url in images {
                items.push(MediaRef {
                    kind: MediaKind::Image,
                    url: url.clone(),
                });
            }
        }

        items
    }
}

/// Clamp a rating into the valid 1-5 range
pub fn clamp_rating(rating: u8) -> u8 {
    rating.clamp(RATING_MIN, RATING_MAX)
}
