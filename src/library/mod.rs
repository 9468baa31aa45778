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


//! Library views
//!
//! Pure, read-only transforms over an in-memory audiobook collection. Nothing
//! in this module touches the filesystem or keeps state between calls; every
//! function borrows its input and returns a freshly built view.
//!
//! # Module Organization
//!
//! ## models
//! - `AudiobookRecord`, `BookRecord`, `AudioTrack` - library documents
//! - `UserProgressRecord`, `ProgressLookup` - per-user listening state
//! - `ViewMode`, `AudiobookView` - minified/expanded projections
//!
//! ## natural
//! Natural ("Book 2" before "Book 10") string ordering.
//!
//! ## token
//! URL + base64 codec for filter values.
//!
//! ## filter
//! `FilterExpression` parsing and application.
//!
//! ## facets
//! Distinct authors, genres, tags, series and narrators.
//!
//! ## series
//! Series grouping and volume ordering.
//!
//! ## recent
//! Recently added / in progress / finished shelves.
//!
//! ## stats
//! Durations, sizes, genre and author popularity, issue counts.

pub mod facets;
pub mod filter;
pub mod models;
pub mod natural;
pub mod recent;
pub mod series;
pub mod stats;
pub mod token;

// Re-export commonly used types for convenience
pub use facets::{extract_facets, FacetData};
pub use filter::{filter_audiobooks, FilterExpression, ProgressFilter, SeriesFilter, NO_SERIES};
pub use models::{
    AudioTrack, AudiobookRecord, AudiobookView, BookRecord, BookWithProgress, ProgressLookup,
    UserProgressMap, UserProgressRecord, ViewMode, VolumeNumber,
};
pub use natural::{natural_cmp, natural_sort};
pub use recent::{books_with_progress, most_recently_added, most_recently_finished, most_recently_in_progress};
pub use series::{group_by_series, series_most_recently_added, sort_series_books, SeriesView};
pub use stats::{author_counts, duration_stats, genre_counts, issue_count, total_size, DurationStats};
pub use token::{decode_filter_value, encode_filter_value};
