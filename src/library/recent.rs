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


//! Recency shelves
//!
//! The "recently added", "continue listening" and "recently finished" shelves
//! of a home screen. All sorts are stable, so ties keep input order, and every
//! shelf holds at most `limit` books.

use crate::library::models::{AudiobookRecord, AudiobookView, BookWithProgress, ProgressLookup, ViewMode};

/// Pair each book with the user's progress, dropping books never opened
pub fn books_with_progress<'a, P: ProgressLookup + ?Sized>(
    audiobooks: &'a [AudiobookRecord],
    progress: &'a P,
) -> Vec<BookWithProgress<'a>> {
    audiobooks
        .iter()
        .filter_map(|book| {
            progress
                .progress_record(&book.id)
                .map(|record| BookWithProgress::new(book, Some(record)))
        })
        .collect()
}

/// Newest books first
pub fn most_recently_added(audiobooks: &[AudiobookRecord], limit: usize, mode: ViewMode) -> Vec<AudiobookView> {
    let mut books: Vec<&AudiobookRecord> = audiobooks.iter().collect();
    books.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    books.into_iter().take(limit).map(|ab| mode.project(ab)).collect()
}

/// Started but unfinished books, most recently listened first
pub fn most_recently_in_progress(
    books: &[BookWithProgress<'_>],
    limit: usize,
    mode: ViewMode,
) -> Vec<AudiobookView> {
    let mut started: Vec<_> = books
        .iter()
        .filter_map(|entry| {
            let record = entry.progress.filter(|record| record.is_in_progress())?;
            Some((entry.book, record.last_update))
        })
        .collect();
    started.sort_by(|a, b| b.1.cmp(&a.1));
    started.into_iter().take(limit).map(|(ab, _)| mode.project(ab)).collect()
}

/// Finished books, most recently finished first
///
/// Books marked read without a finish time sort after the rest.
pub fn most_recently_finished(books: &[BookWithProgress<'_>], limit: usize, mode: ViewMode) -> Vec<AudiobookView> {
    let mut finished: Vec<_> = books
        .iter()
        .filter_map(|entry| {
            let record = entry.progress.filter(|record| record.is_read)?;
            Some((entry.book, record.finished_at))
        })
        .collect();
    finished.sort_by(|a, b| b.1.cmp(&a.1));
    finished.into_iter().take(limit).map(|(ab, _)| mode.project(ab)).collect()
}
