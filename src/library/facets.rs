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


//! Distinct facet values
//!
//! Builds the option lists of the library filter menu: every distinct,
//! non-empty author, genre, tag, series and narrator, naturally sorted.

use crate::library::models::AudiobookRecord;
use crate::library::natural::natural_sort;
use serde::Serialize;
use std::collections::HashSet;

/// Distinct values per facet, each naturally sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetData {
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub series: Vec<String>,
    pub narrators: Vec<String>,
}

impl FacetData {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
            && self.genres.is_empty()
            && self.tags.is_empty()
            && self.series.is_empty()
            && self.narrators.is_empty()
    }
}

/// Insertion-ordered set of non-empty strings
#[derive(Default)]
struct DistinctValues {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl DistinctValues {
    fn add(&mut self, value: &str) {
        if !value.is_empty() && !self.seen.contains(value) {
            self.seen.insert(value.to_string());
            self.values.push(value.to_string());
        }
    }

    fn extend<'a, I: IntoIterator<Item = &'a String>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }

    fn into_sorted(self) -> Vec<String> {
        let mut values = self.values;
        natural_sort(&mut values);
        values
    }
}

/// Collect the distinct facet values of a collection in one pass
///
/// Items without a book still contribute their tags.
pub fn extract_facets(audiobooks: &[AudiobookRecord]) -> FacetData {
    let mut authors = DistinctValues::default();
    let mut genres = DistinctValues::default();
    let mut tags = DistinctValues::default();
    let mut series = DistinctValues::default();
    let mut narrators = DistinctValues::default();

    for audiobook in audiobooks {
        tags.extend(&audiobook.tags);

        let Some(book) = &audiobook.book else {
            continue;
        };
        authors.extend(&book.authors);
        genres.extend(&book.genres);
        narrators.extend(&book.narrators);
        if let Some(name) = book.series_name() {
            series.add(name);
        }
    }

    FacetData {
        authors: authors.into_sorted(),
        genres: genres.into_sorted(),
        tags: tags.into_sorted(),
        series: series.into_sorted(),
        narrators: narrators.into_sorted(),
    }
}
