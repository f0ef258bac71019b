//! Collection statistics

use vault_store::VinylRecord;

/// One bar of the genre distribution chart
#[derive(Debug, Clone, PartialEq)]
pub struct GenreCount {
    pub name: String,
    pub value: usize,
}

/// Aggregate figures over the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub total: usize,
    pub top_genre: String,
    pub top_artist: String,
    pub avg_rating: f64,
    /// Top 8 genres by count, descending
    pub genre_chart: Vec<GenreCount>,
}

impl CollectionStats {
    pub fn compute(records: &[VinylRecord]) -> Self {
        let total = records.len();
        let mut genre_counts: Vec<(String, usize)> = Vec::new();
        let mut artist_counts: Vec<(String, usize)> = Vec::new();
        let mut rating_sum = 0u64;

        for record in records {
            bump(&mut genre_counts, &record.genre);
            bump(&mut artist_counts, &record.artist);
            rating_sum += record.rating as u64;
        }

        // Stable sort keeps first-seen order on ties
        genre_counts.sort_by(|a, b| b.1.cmp(&a.1));
        artist_counts.sort_by(|a, b| b.1.cmp(&a.1));

        let top_genre = genre_counts
            .first()
            .map_or_else(|| "N/A".to_string(), |(name, _)| name.clone());
        let top_artist = artist_counts
            .first()
            .map_or_else(|| "N/A".to_string(), |(name, _)| name.clone());

        let avg_rating = if total > 0 {
            rating_sum as f64 / total as f64
        } else {
            0.0
        };

        let genre_chart = genre_counts
            .into_iter()
            .take(8)
            .map(|(name, value)| GenreCount { name, value })
            .collect();

        Self {
            total,
            top_genre,
            top_artist,
            avg_rating,
            genre_chart,
        }
    }

    /// Average rating formatted to one decimal, as shown in the overlay
    pub fn avg_rating_label(&self) -> String {
        format!("{:.1}", self.avg_rating)
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(name, _)| name == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}
