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


//! Facet filtering
//!
//! A filter arrives from the client as `"<group>.<token>"` (for example
//! `genres.RmFudGFzeQ%3D%3D`) or as the bare word `issues`. It is parsed once
//! into a [`FilterExpression`] and then applied as a predicate. Anything that
//! is neither a known group nor `issues` leaves the collection untouched.

use crate::error::Result;
use crate::library::models::{AudiobookRecord, BookRecord, ProgressLookup, UserProgressRecord};
use crate::library::token::{decode_filter_value, encode_filter_value};
use std::fmt;
use tracing::{debug, warn};

/// Series filter value that selects books without a series
pub const NO_SERIES: &str = "No Series";

/// Literal filter selecting items with data-quality issues
pub const ISSUES_FILTER: &str = "issues";

/// Listening state a progress filter selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressFilter {
    /// Marked read
    Read,
    /// Not marked read, including books that were started
    Unread,
    /// Started but not marked read
    InProgress,
    /// Any other value, kept verbatim; selects nothing
    Unrecognized(String),
}

impl ProgressFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "Read" => ProgressFilter::Read,
            "Unread" => ProgressFilter::Unread,
            "In Progress" => ProgressFilter::InProgress,
            other => ProgressFilter::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProgressFilter::Read => "Read",
            ProgressFilter::Unread => "Unread",
            ProgressFilter::InProgress => "In Progress",
            ProgressFilter::Unrecognized(value) => value,
        }
    }

    /// A missing record counts as unread and never as in progress
    pub fn matches(&self, record: Option<&UserProgressRecord>) -> bool {
        let is_read = record.map(|r| r.is_read).unwrap_or(false);
        match self {
            ProgressFilter::Read => is_read,
            ProgressFilter::Unread => !is_read,
            ProgressFilter::InProgress => record.map(UserProgressRecord::is_in_progress).unwrap_or(false),
            ProgressFilter::Unrecognized(_) => false,
        }
    }
}

/// Which side of the series filter was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesFilter {
    /// Books without a series
    NoSeries,
    Named(String),
}

/// Facet groups that take a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterGroup {
    Genres,
    Tags,
    Series,
    Authors,
    Progress,
    Narrators,
}

impl FilterGroup {
    const ALL: [FilterGroup; 6] = [
        FilterGroup::Genres,
        FilterGroup::Tags,
        FilterGroup::Series,
        FilterGroup::Authors,
        FilterGroup::Progress,
        FilterGroup::Narrators,
    ];

    fn prefix(self) -> &'static str {
        match self {
            FilterGroup::Genres => "genres",
            FilterGroup::Tags => "tags",
            FilterGroup::Series => "series",
            FilterGroup::Authors => "authors",
            FilterGroup::Progress => "progress",
            FilterGroup::Narrators => "narrators",
        }
    }
}

/// A parsed library filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpression {
    Genre(String),
    Tag(String),
    Series(SeriesFilter),
    Author(String),
    Narrator(String),
    Progress(ProgressFilter),
    Issues,
}

impl FilterExpression {
    /// Parse a raw filter string
    ///
    /// Returns `Ok(None)` for strings that name no known group and are not
    /// `issues`; callers treat that as "no filter".
    ///
    /// # Errors
    /// `LibraryError::Decoding` when the value after the group prefix is not a
    /// valid token.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        let matched = FilterGroup::ALL.iter().find_map(|group| {
            raw.strip_prefix(group.prefix())
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|token| (*group, token))
        });

        let Some((group, token)) = matched else {
            return Ok((raw == ISSUES_FILTER).then_some(FilterExpression::Issues));
        };

        let value = decode_filter_value(token).map_err(|e| {
            warn!(group = group.prefix(), error = %e, "Rejected filter token");
            e
        })?;

        let expression = match group {
            FilterGroup::Genres => FilterExpression::Genre(value),
            FilterGroup::Tags => FilterExpression::Tag(value),
            FilterGroup::Series if value == NO_SERIES => FilterExpression::Series(SeriesFilter::NoSeries),
            FilterGroup::Series => FilterExpression::Series(SeriesFilter::Named(value)),
            FilterGroup::Authors => FilterExpression::Author(value),
            FilterGroup::Narrators => FilterExpression::Narrator(value),
            FilterGroup::Progress => FilterExpression::Progress(ProgressFilter::parse(&value)),
        };

        Ok(Some(expression))
    }

    pub fn group(&self) -> &'static str {
        match self {
            FilterExpression::Genre(_) => "genres",
            FilterExpression::Tag(_) => "tags",
            FilterExpression::Series(_) => "series",
            FilterExpression::Author(_) => "authors",
            FilterExpression::Narrator(_) => "narrators",
            FilterExpression::Progress(_) => "progress",
            FilterExpression::Issues => ISSUES_FILTER,
        }
    }

    /// Render back into the `"<group>.<token>"` wire form
    pub fn to_token(&self) -> String {
        let value = match self {
            FilterExpression::Issues => return ISSUES_FILTER.to_string(),
            FilterExpression::Genre(v)
            | FilterExpression::Tag(v)
            | FilterExpression::Author(v)
            | FilterExpression::Narrator(v) => v.as_str(),
            FilterExpression::Series(SeriesFilter::NoSeries) => NO_SERIES,
            FilterExpression::Series(SeriesFilter::Named(v)) => v.as_str(),
            FilterExpression::Progress(p) => p.as_str(),
        };
        format!("{}.{}", self.group(), encode_filter_value(value))
    }

    /// Does a single item pass this filter
    pub fn matches<P: ProgressLookup + ?Sized>(&self, audiobook: &AudiobookRecord, progress: &P) -> bool {
        match self {
            FilterExpression::Genre(genre) => book_matches(audiobook, |book| book.genres.contains(genre)),
            FilterExpression::Tag(tag) => audiobook.tags.contains(tag),
            FilterExpression::Series(SeriesFilter::NoSeries) => {
                book_matches(audiobook, |book| book.series_name().is_none())
            }
            FilterExpression::Series(SeriesFilter::Named(name)) => {
                book_matches(audiobook, |book| book.series.as_deref() == Some(name.as_str()))
            }
            FilterExpression::Author(author) => book_matches(audiobook, |book| book.authors.contains(author)),
            FilterExpression::Narrator(narrator) => {
                book_matches(audiobook, |book| book.narrators.contains(narrator))
            }
            FilterExpression::Progress(state) => state.matches(progress.progress_record(&audiobook.id)),
            FilterExpression::Issues => audiobook.has_issues(),
        }
    }

    /// Keep the items that pass, in input order
    pub fn apply<'a, P: ProgressLookup + ?Sized>(
        &self,
        audiobooks: &'a [AudiobookRecord],
        progress: &P,
    ) -> Vec<&'a AudiobookRecord> {
        let filtered: Vec<_> = audiobooks
            .iter()
            .filter(|ab| self.matches(ab, progress))
            .collect();
        debug!(
            group = self.group(),
            total = audiobooks.len(),
            matched = filtered.len(),
            "Applied library filter"
        );
        filtered
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

/// Items without a book never match a book predicate
fn book_matches<F: FnOnce(&BookRecord) -> bool>(audiobook: &AudiobookRecord, predicate: F) -> bool {
    audiobook.book.as_ref().map(predicate).unwrap_or(false)
}

/// Filter a collection by a raw filter string
///
/// Unknown filters return every item unchanged.
pub fn filter_audiobooks<'a, P: ProgressLookup + ?Sized>(
    audiobooks: &'a [AudiobookRecord],
    filter_by: &str,
    progress: &P,
) -> Result<Vec<&'a AudiobookRecord>> {
    match FilterExpression::parse(filter_by)? {
        Some(expression) => Ok(expression.apply(audiobooks, progress)),
        None => {
            debug!(filter_by, "Unrecognized filter, returning full collection");
            Ok(audiobooks.iter().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;
    use crate::library::models::UserProgressMap;

    fn book(id: &str, series: Option<&str>, authors: &[&str]) -> AudiobookRecord {
        let mut book = BookRecord::new(format!("Title {}", id));
        book.series = series.map(str::to_string);
        book.authors = authors.iter().map(|a| a.to_string()).collect();
        book.genres = vec!["Fantasy".to_string()];
        AudiobookRecord::new(id, book)
    }

    fn ids(items: &[&AudiobookRecord]) -> Vec<String> {
        items.iter().map(|ab| ab.id.clone()).collect()
    }

    #[test]
    fn test_parse_groups() {
        let genre = FilterExpression::parse(&format!("genres.{}", encode_filter_value("Sci-Fi"))).unwrap();
        assert_eq!(genre, Some(FilterExpression::Genre("Sci-Fi".to_string())));

        let no_series = FilterExpression::parse("series.Tm8gU2VyaWVz").unwrap();
        assert_eq!(no_series, Some(FilterExpression::Series(SeriesFilter::NoSeries)));

        assert_eq!(FilterExpression::parse("issues").unwrap(), Some(FilterExpression::Issues));
        assert_eq!(FilterExpression::parse("issues.x").unwrap(), None);
        assert_eq!(FilterExpression::parse("genres").unwrap(), None);
        assert_eq!(FilterExpression::parse("publishers.QQ==").unwrap(), None);
    }

    #[test]
    fn test_unrecognized_progress_keeps_value() {
        let raw = format!("progress.{}", encode_filter_value("Someday"));
        let parsed = FilterExpression::parse(&raw).unwrap().unwrap();
        assert_eq!(parsed, FilterExpression::Progress(ProgressFilter::Unrecognized("Someday".to_string())));
        assert_eq!(parsed.to_token(), raw);
    }

    #[test]
    fn test_value_may_contain_dots() {
        let token = format!("authors.{}", encode_filter_value("J.R.R. Tolkien"));
        let parsed = FilterExpression::parse(&token).unwrap().unwrap();
        assert_eq!(parsed, FilterExpression::Author("J.R.R. Tolkien".to_string()));
        assert_eq!(parsed.to_token(), token);
    }

    #[test]
    fn test_bad_token_is_decoding_error() {
        let err = FilterExpression::parse("tags.%%%").unwrap_err();
        assert!(matches!(err, LibraryError::Decoding { .. }));
    }

    #[test]
    fn test_series_filters() {
        let missing_book = AudiobookRecord {
            id: "orphan".to_string(),
            ..Default::default()
        };
        let items = vec![
            book("a", Some("Dune"), &[]),
            book("b", None, &[]),
            book("c", Some(""), &[]),
            missing_book,
        ];
        let progress = UserProgressMap::new();

        let none = FilterExpression::Series(SeriesFilter::NoSeries).apply(&items, &progress);
        assert_eq!(ids(&none), vec!["b", "c"]);

        let dune = FilterExpression::Series(SeriesFilter::Named("Dune".to_string())).apply(&items, &progress);
        assert_eq!(ids(&dune), vec!["a"]);
    }

    #[test]
    fn test_author_names_with_separator() {
        let items = vec![book("a", None, &["Smith, Jr., John", "Jane Doe"]), book("b", None, &["Jane"])];
        let progress = UserProgressMap::new();

        let jane = FilterExpression::Author("Jane Doe".to_string()).apply(&items, &progress);
        assert_eq!(ids(&jane), vec!["a"]);
        let smith = FilterExpression::Author("Smith, Jr., John".to_string()).apply(&items, &progress);
        assert_eq!(ids(&smith), vec!["a"]);
    }

    #[test]
    fn test_progress_classification() {
        let items = vec![book("read", None, &[]), book("started", None, &[]), book("untouched", None, &[])];
        let mut progress = UserProgressMap::new();
        progress.insert(
            "read",
            UserProgressRecord {
                is_read: true,
                progress: 1.0,
                ..Default::default()
            },
        );
        progress.insert(
            "started",
            UserProgressRecord {
                progress: 0.3,
                ..Default::default()
            },
        );

        let apply = |state| ids(&FilterExpression::Progress(state).apply(&items, &progress));
        assert_eq!(apply(ProgressFilter::Read), vec!["read"]);
        assert_eq!(apply(ProgressFilter::Unread), vec!["started", "untouched"]);
        assert_eq!(apply(ProgressFilter::InProgress), vec!["started"]);
        assert!(apply(ProgressFilter::Unrecognized("Someday".to_string())).is_empty());
    }

    #[test]
    fn test_issues_filter() {
        let mut broken = book("broken", None, &[]);
        broken.num_invalid_parts = 2;
        let mut missing = book("missing", None, &[]);
        missing.is_missing = true;
        let items = vec![book("ok", None, &[]), broken, missing];

        let result = filter_audiobooks(&items, "issues", &UserProgressMap::new()).unwrap();
        assert_eq!(ids(&result), vec!["broken", "missing"]);
    }

    #[test]
    fn test_unknown_filter_is_noop() {
        let items = vec![book("a", None, &[]), book("b", None, &[])];
        for raw in ["", "all", "Issues", "genre.RmFudGFzeQ=="] {
            let result = filter_audiobooks(&items, raw, &UserProgressMap::new()).unwrap();
            assert_eq!(result.len(), items.len());
            assert!(result.iter().zip(items.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
        }
    }
}
