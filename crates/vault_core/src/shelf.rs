//! Shelf index filtering
//!
//! Pure filtering and ordering for the flat index view of the
//! collection: optional exact genre match, case-insensitive search over
//! title and artist, newest additions first.

use vault_store::VinylRecord;

/// Filter and sort records for the index view. An empty search term
/// matches everything; `genre` of `None` means no genre filter.
pub fn filter_records<'a>(
    records: &'a [VinylRecord],
    search: &str,
    genre: Option<&str>,
) -> Vec<&'a VinylRecord> {
    let needle = search.trim().to_lowercase();

    let mut result: Vec<&VinylRecord> = records
        .iter()
        .filter(|r| genre.map_or(true, |g| r.genre == g))
        .filter(|r| {
            needle.is_empty()
                || r.title.to_lowercase().contains(&needle)
                || r.artist.to_lowercase().contains(&needle)
        })
        .collect();

    result.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    result
}
