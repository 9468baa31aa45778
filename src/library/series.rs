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


//! Series grouping
//!
//! Groups books that share a series name into series views. Books inside a
//! series are ordered by volume number in natural order, with books lacking a
//! volume number at the end. The series themselves keep the order in which
//! they were first seen in the input.

use crate::library::models::{AudiobookRecord, AudiobookView, ViewMode};
use crate::library::natural::natural_cmp_opt;
use serde::Serialize;
use std::collections::HashMap;

/// Serialized `type` tag of a series view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Series,
}

/// A derived series with its books
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub books: Vec<AudiobookView>,
}

impl SeriesView {
    /// Newest `added_at` among the books, `None` for an empty series
    pub fn latest_added_at(&self) -> Option<i64> {
        self.books.iter().map(AudiobookView::added_at).max()
    }
}

/// Sort audiobooks by volume number, stable for equal volumes
fn sort_by_volume(books: &mut [&AudiobookRecord]) {
    books.sort_by(|a, b| {
        let left = a.book.as_ref().and_then(|book| book.volume_sort_key());
        let right = b.book.as_ref().and_then(|book| book.volume_sort_key());
        natural_cmp_opt(left.as_deref(), right.as_deref())
    });
}

/// Group books into series views in first-seen order
///
/// Books without a series, or with an empty series name, are skipped.
pub fn group_by_series(audiobooks: &[AudiobookRecord], mode: ViewMode) -> Vec<SeriesView> {
    let mut order: Vec<(&str, Vec<&AudiobookRecord>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for audiobook in audiobooks {
        let Some(name) = audiobook.book.as_ref().and_then(|book| book.series_name()) else {
            continue;
        };
        match index.get(name) {
            Some(&position) => order[position].1.push(audiobook),
            None => {
                index.insert(name, order.len());
                order.push((name, vec![audiobook]));
            }
        }
    }

    order
        .into_iter()
        .map(|(name, mut books)| {
            sort_by_volume(&mut books);
            SeriesView {
                id: name.to_string(),
                name: name.to_string(),
                kind: SeriesKind::Series,
                books: books.into_iter().map(|ab| mode.project(ab)).collect(),
            }
        })
        .collect()
}

/// Sort the books of a single series by volume number and project them
pub fn sort_series_books(audiobooks: &[AudiobookRecord], mode: ViewMode) -> Vec<AudiobookView> {
    let mut books: Vec<&AudiobookRecord> = audiobooks.iter().collect();
    sort_by_volume(&mut books);
    books.into_iter().map(|ab| mode.project(ab)).collect()
}

/// Series ordered by their most recently added book, newest first
///
/// Stable for series whose newest books share a timestamp; empty series go last.
pub fn series_most_recently_added(mut series: Vec<SeriesView>, limit: usize) -> Vec<SeriesView> {
    series.sort_by(|a, b| b.latest_added_at().cmp(&a.latest_added_at()));
    series.truncate(limit);
    series
}
