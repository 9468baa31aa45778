// Shelf Core - Audiobook library views
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Library statistics
//!
//! Totals and rankings for the library stats screen.

use crate::library::models::AudiobookRecord;
use serde::Serialize;
use std::collections::HashMap;

/// How many of the longest audiobooks the stats report lists
pub const LONGEST_AUDIOBOOKS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDuration {
    pub title: String,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    /// Seconds
    pub total_duration: f64,
    pub num_audio_tracks: usize,
    /// Longest items first; items with no duration are left out
    pub longest_audiobooks: Vec<TitleDuration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

/// Duration totals plus the ten longest audiobooks
///
/// The top ten is picked before zero-length items are removed, so fewer than
/// ten entries can come back even when the library is larger.
pub fn duration_stats(audiobooks: &[AudiobookRecord]) -> DurationStats {
    let mut by_duration: Vec<&AudiobookRecord> = audiobooks.iter().collect();
    by_duration.sort_by(|a, b| b.duration.total_cmp(&a.duration));

    let longest_audiobooks = by_duration
        .into_iter()
        .take(LONGEST_AUDIOBOOKS_LIMIT)
        .map(|ab| TitleDuration {
            title: ab.title().unwrap_or_default().to_string(),
            duration: ab.duration,
        })
        .filter(|entry| entry.duration > 0.0)
        .collect();

    DurationStats {
        total_duration: audiobooks.iter().map(|ab| ab.duration).sum(),
        num_audio_tracks: audiobooks.iter().map(AudiobookRecord::num_tracks).sum(),
        longest_audiobooks,
    }
}

/// Total size in bytes
pub fn total_size(audiobooks: &[AudiobookRecord]) -> u64 {
    audiobooks.iter().map(|ab| ab.size).sum()
}

/// Insert-or-increment counter that remembers first-seen order
#[derive(Default)]
struct Tally<'a> {
    positions: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, usize)>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, key: &'a str) {
        match self.positions.get(key) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.positions.insert(key, self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Highest count first; equal counts keep first-seen order
    fn into_ranked(self) -> Vec<(&'a str, usize)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Number of audiobooks per genre, most common first
pub fn genre_counts(audiobooks: &[AudiobookRecord]) -> Vec<GenreCount> {
    let mut tally = Tally::default();
    for genre in audiobooks.iter().filter_map(|ab| ab.book.as_ref()).flat_map(|book| &book.genres) {
        tally.add(genre);
    }
    tally
        .into_ranked()
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect()
}

/// Number of audiobooks per author, most common first
pub fn author_counts(audiobooks: &[AudiobookRecord]) -> Vec<AuthorCount> {
    let mut tally = Tally::default();
    for author in audiobooks.iter().filter_map(|ab| ab.book.as_ref()).flat_map(|book| &book.authors) {
        tally.add(author);
    }
    tally
        .into_ranked()
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect()
}

/// Number of audiobooks with missing or invalid files
pub fn issue_count(audiobooks: &[AudiobookRecord]) -> usize {
    audiobooks.iter().filter(|ab| ab.has_issues()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::models::{AudioTrack, BookRecord};

    fn timed(title: &str, duration: f64, tracks: usize) -> AudiobookRecord {
        let mut record = AudiobookRecord::new(title, BookRecord::new(title));
        record.duration = duration;
        record.tracks = vec![AudioTrack::default(); tracks];
        record
    }

    fn with_genres(genres: &[&str], authors: &[&str]) -> AudiobookRecord {
        let mut book = BookRecord::new("t");
        book.genres = genres.iter().map(|s| s.to_string()).collect();
        book.authors = authors.iter().map(|s| s.to_string()).collect();
        AudiobookRecord::new("id", book)
    }

    #[test]
    fn test_duration_stats_drops_zero_after_top_ten() {
        let items = vec![timed("zero", 0.0, 1), timed("fifty", 50.0, 2), timed("thirty", 30.0, 3)];
        let stats = duration_stats(&items);
        assert_eq!(stats.total_duration, 80.0);
        assert_eq!(stats.num_audio_tracks, 6);
        let durations: Vec<f64> = stats.longest_audiobooks.iter().map(|e| e.duration).collect();
        assert_eq!(durations, vec![50.0, 30.0]);
        assert_eq!(stats.longest_audiobooks[0].title, "fifty");
    }

    #[test]
    fn test_longest_is_not_backfilled() {
        let mut items: Vec<AudiobookRecord> = (0..12).map(|i| timed(&format!("b{}", i), 100.0, 1)).collect();
        items.push(timed("short", 1.0, 1));
        let stats = duration_stats(&items);
        assert_eq!(stats.longest_audiobooks.len(), LONGEST_AUDIOBOOKS_LIMIT);
        // ties keep input order
        assert_eq!(stats.longest_audiobooks[0].title, "b0");
        assert_eq!(stats.longest_audiobooks[9].title, "b9");
    }

    #[test]
    fn test_empty_library() {
        let stats = duration_stats(&[]);
        assert_eq!(stats.total_duration, 0.0);
        assert!(stats.longest_audiobooks.is_empty());
        assert_eq!(total_size(&[]), 0);
        assert_eq!(issue_count(&[]), 0);
    }

    #[test]
    fn test_total_size_and_issues() {
        let mut a = timed("a", 1.0, 1);
        a.size = 1_000;
        let mut b = timed("b", 1.0, 1);
        b.size = 2_500;
        b.num_missing_parts = 1;
        let items = vec![a, b];
        assert_eq!(total_size(&items), 3_500);
        assert_eq!(issue_count(&items), 1);
    }

    #[test]
    fn test_genre_counts_rank_and_ties() {
        let items = vec![
            with_genres(&["Horror", "Fantasy"], &[]),
            with_genres(&["Fantasy", "Sci-Fi"], &[]),
            with_genres(&["Sci-Fi"], &[]),
            AudiobookRecord::default(),
        ];
        let counts = genre_counts(&items);
        let ranked: Vec<(&str, usize)> = counts.iter().map(|g| (g.genre.as_str(), g.count)).collect();
        assert_eq!(ranked, vec![("Fantasy", 2), ("Sci-Fi", 2), ("Horror", 1)]);
    }

    #[test]
    fn test_author_counts() {
        let items = vec![
            with_genres(&[], &["Brandon Sanderson"]),
            with_genres(&[], &["Robert Jordan", "Brandon Sanderson"]),
        ];
        let counts = author_counts(&items);
        assert_eq!(counts[0].author, "Brandon Sanderson");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].author, "Robert Jordan");
    }
}
