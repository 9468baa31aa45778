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


//! Library record models
//!
//! Typed versions of the denormalized audiobook documents a library server
//! keeps in memory. All fields that may be missing in stored documents are
//! `Option`s or default to empty, so every view can treat absence as
//! "no match" without special cases.
//!
//! # Serialized Shape
//! - Field names are camelCase
//! - The denormalized keys (`_authorsList`, `_genres`, `_genresList`,
//!   `_series`, `_narratorsList`) and the joined `authorFL`/`narratorFL`
//!   strings are read alongside the plain keys
//! - `null` lists read as empty
//! - Timestamps are epoch milliseconds

use crate::audio::AudioProbeData;
use crate::file::FileKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Separator used by the joined author/narrator display strings
pub const NAME_SEPARATOR: &str = ", ";

// ============================================================================
// BOOK
// ============================================================================

/// Position of a book within its series
///
/// Stored documents carry either a number (`2`) or free text (`"2.5"`, `"Book 3"`).
/// Ordering always goes through the natural comparator on the text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolumeNumber {
    Number(f64),
    Text(String),
}

impl VolumeNumber {
    /// Text form used as the natural sort key
    pub fn sort_key(&self) -> Cow<'_, str> {
        match self {
            VolumeNumber::Number(n) => Cow::Owned(n.to_string()),
            VolumeNumber::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl fmt::Display for VolumeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sort_key())
    }
}

impl From<&str> for VolumeNumber {
    fn from(value: &str) -> Self {
        VolumeNumber::Text(value.to_string())
    }
}

impl From<f64> for VolumeNumber {
    fn from(value: f64) -> Self {
        VolumeNumber::Number(value)
    }
}

/// Book metadata nested in an audiobook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BookDocument")]
pub struct BookRecord {
    pub title: String,
    pub series: Option<String>,
    pub volume_number: Option<VolumeNumber>,
    pub genres: Vec<String>,
    /// Author full names, in credit order
    pub authors: Vec<String>,
    /// Narrator full names, in credit order
    pub narrators: Vec<String>,
}

/// Stored shape of a book document
///
/// Documents may carry a plain key and its denormalized twin side by side
/// (`series` and `_series`, `genres` and `_genresList`), and older documents
/// only carry the joined `authorFL`/`narratorFL` strings. Every key is read
/// separately and merged into a [`BookRecord`]: the plain key wins, then the
/// denormalized list, then the split joined string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BookDocument {
    title: Option<String>,
    series: Option<String>,
    #[serde(rename = "_series")]
    series_denormalized: Option<String>,
    volume_number: Option<VolumeNumber>,
    genres: Option<Vec<String>>,
    #[serde(rename = "_genres")]
    genres_denormalized: Option<Vec<String>>,
    #[serde(rename = "_genresList")]
    genres_list: Option<Vec<String>>,
    authors: Option<Vec<String>>,
    #[serde(rename = "_authorsList")]
    authors_list: Option<Vec<String>>,
    #[serde(rename = "authorFL")]
    author_fl: Option<String>,
    narrators: Option<Vec<String>>,
    #[serde(rename = "_narratorsList")]
    narrators_list: Option<Vec<String>>,
    #[serde(rename = "narratorFL")]
    narrator_fl: Option<String>,
}

impl From<BookDocument> for BookRecord {
    fn from(doc: BookDocument) -> Self {
        let series = [doc.series, doc.series_denormalized]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty());
        let genres = first_list([doc.genres, doc.genres_denormalized, doc.genres_list]);
        let authors = first_list([doc.authors, doc.authors_list, doc.author_fl.as_deref().map(split_names)]);
        let narrators = first_list([doc.narrators, doc.narrators_list, doc.narrator_fl.as_deref().map(split_names)]);

        Self {
            title: doc.title.unwrap_or_default(),
            series,
            volume_number: doc.volume_number,
            genres,
            authors,
            narrators,
        }
    }
}

/// First non-empty list, or an empty one
fn first_list<const N: usize>(candidates: [Option<Vec<String>>; N]) -> Vec<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|list| !list.is_empty())
        .unwrap_or_default()
}

/// Split a joined "Name1, Name2" display string back into names
fn split_names(joined: &str) -> Vec<String> {
    joined
        .split(NAME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Treat an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BookRecord {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Series name, `None` when absent or empty
    pub fn series_name(&self) -> Option<&str> {
        self.series.as_deref().filter(|s| !s.is_empty())
    }

    /// Authors joined for display: "Author1, Author2"
    pub fn author_fl(&self) -> Option<String> {
        join_names(&self.authors)
    }

    /// Narrators joined for display: "Narrator1, Narrator2"
    pub fn narrator_fl(&self) -> Option<String> {
        join_names(&self.narrators)
    }

    /// Natural sort key for ordering inside a series
    pub fn volume_sort_key(&self) -> Option<Cow<'_, str>> {
        self.volume_number.as_ref().map(VolumeNumber::sort_key)
    }
}

fn join_names(names: &[String]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join(NAME_SEPARATOR))
    }
}

// ============================================================================
// AUDIOBOOK
// ============================================================================

/// One audio file belonging to an audiobook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioTrack {
    /// 1-based position within the audiobook
    pub index: u32,
    pub filename: String,
    pub ext: String,
    /// Duration in seconds
    pub duration: f64,
    /// Size in bytes
    pub size: u64,
    pub metadata: Option<AudioProbeData>,
}

impl AudioTrack {
    pub fn file_kind(&self) -> FileKind {
        FileKind::from_extension(&self.ext)
    }
}

/// One library item: a book, its tracks and file-level bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudiobookRecord {
    pub id: String,
    pub book: Option<BookRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tracks: Vec<AudioTrack>,
    /// Total duration in seconds
    pub duration: f64,
    /// Total size in bytes
    pub size: u64,
    /// Epoch milliseconds
    pub added_at: i64,
    pub num_missing_parts: u32,
    pub num_invalid_parts: u32,
    pub is_missing: bool,
    pub is_invalid: bool,
}

impl AudiobookRecord {
    pub fn new<S: Into<String>>(id: S, book: BookRecord) -> Self {
        Self {
            id: id.into(),
            book: Some(book),
            ..Default::default()
        }
    }

    /// True when any issue flag is set
    pub fn has_issues(&self) -> bool {
        self.num_missing_parts > 0 || self.num_invalid_parts > 0 || self.is_missing || self.is_invalid
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn title(&self) -> Option<&str> {
        self.book.as_ref().map(|book| book.title.as_str())
    }

    /// Reduced projection for list screens
    pub fn to_minified(&self) -> MinifiedAudiobook {
        MinifiedAudiobook {
            id: self.id.clone(),
            book: self.book.as_ref().map(|book| MinifiedBook {
                title: book.title.clone(),
                series: book.series_name().map(str::to_string),
                volume_number: book.volume_number.clone(),
                author_fl: book.author_fl(),
                narrator_fl: book.narrator_fl(),
            }),
            tags: self.tags.clone(),
            num_tracks: self.num_tracks(),
            duration: self.duration,
            size: self.size,
            added_at: self.added_at,
            has_issues: self.has_issues(),
        }
    }

    /// Full projection for detail screens
    pub fn to_expanded(&self) -> ExpandedAudiobook {
        ExpandedAudiobook {
            record: self.clone(),
            num_tracks: self.num_tracks(),
            has_issues: self.has_issues(),
        }
    }
}

// ============================================================================
// PROJECTIONS
// ============================================================================

/// Which projection of a book a view should embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Minified,
    #[default]
    Expanded,
}

impl ViewMode {
    pub fn from_minified_flag(minified: bool) -> Self {
        if minified {
            ViewMode::Minified
        } else {
            ViewMode::Expanded
        }
    }

    pub fn project(self, audiobook: &AudiobookRecord) -> AudiobookView {
        match self {
            ViewMode::Minified => AudiobookView::Minified(audiobook.to_minified()),
            ViewMode::Expanded => AudiobookView::Expanded(Box::new(audiobook.to_expanded())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifiedBook {
    pub title: String,
    pub series: Option<String>,
    pub volume_number: Option<VolumeNumber>,
    #[serde(rename = "authorFL")]
    pub author_fl: Option<String>,
    #[serde(rename = "narratorFL")]
    pub narrator_fl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifiedAudiobook {
    pub id: String,
    pub book: Option<MinifiedBook>,
    pub tags: Vec<String>,
    pub num_tracks: usize,
    pub duration: f64,
    pub size: u64,
    pub added_at: i64,
    pub has_issues: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedAudiobook {
    #[serde(flatten)]
    pub record: AudiobookRecord,
    pub num_tracks: usize,
    pub has_issues: bool,
}

/// A projected audiobook as returned by the views
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AudiobookView {
    Minified(MinifiedAudiobook),
    Expanded(Box<ExpandedAudiobook>),
}

impl AudiobookView {
    pub fn id(&self) -> &str {
        match self {
            AudiobookView::Minified(view) => &view.id,
            AudiobookView::Expanded(view) => &view.record.id,
        }
    }

    pub fn added_at(&self) -> i64 {
        match self {
            AudiobookView::Minified(view) => view.added_at,
            AudiobookView::Expanded(view) => view.record.added_at,
        }
    }

    pub fn volume_number(&self) -> Option<&VolumeNumber> {
        match self {
            AudiobookView::Minified(view) => view.book.as_ref()?.volume_number.as_ref(),
            AudiobookView::Expanded(view) => view.record.book.as_ref()?.volume_number.as_ref(),
        }
    }
}

// ============================================================================
// USER PROGRESS
// ============================================================================

/// A user's listening state for one audiobook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgressRecord {
    pub is_read: bool,
    /// Fraction listened, 0..1
    pub progress: f64,
    /// Epoch milliseconds
    pub last_update: i64,
    /// Epoch milliseconds, set once the book is marked read
    pub finished_at: Option<i64>,
}

impl UserProgressRecord {
    pub fn is_in_progress(&self) -> bool {
        !self.is_read && self.progress > 0.0
    }
}

/// Source of per-audiobook progress for one user
pub trait ProgressLookup {
    fn progress_record(&self, audiobook_id: &str) -> Option<&UserProgressRecord>;
}

impl ProgressLookup for HashMap<String, UserProgressRecord> {
    fn progress_record(&self, audiobook_id: &str) -> Option<&UserProgressRecord> {
        self.get(audiobook_id)
    }
}

/// Progress records of a single user keyed by audiobook id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProgressMap {
    records: HashMap<String, UserProgressRecord>,
}

impl UserProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, audiobook_id: S, record: UserProgressRecord) {
        self.records.insert(audiobook_id.into(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProgressLookup for UserProgressMap {
    fn progress_record(&self, audiobook_id: &str) -> Option<&UserProgressRecord> {
        self.records.get(audiobook_id)
    }
}

impl FromIterator<(String, UserProgressRecord)> for UserProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, UserProgressRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// A book joined with the user's progress on it
#[derive(Debug, Clone, Copy)]
pub struct BookWithProgress<'a> {
    pub book: &'a AudiobookRecord,
    pub progress: Option<&'a UserProgressRecord>,
}

impl<'a> BookWithProgress<'a> {
    pub fn new(book: &'a AudiobookRecord, progress: Option<&'a UserProgressRecord>) -> Self {
        Self { book, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_denormalized_keys() {
        let record: AudiobookRecord = serde_json::from_value(json!({
            "id": "ab_1",
            "book": {
                "title": "The Hobbit",
                "_series": "Middle-earth",
                "volumeNumber": 1,
                "_genres": ["Fantasy"],
                "_authorsList": ["J. R. R. Tolkien"],
                "_narratorsList": ["Andy Serkis", "Rob Inglis"]
            },
            "tags": ["classic"],
            "duration": 39600.5,
            "size": 640000000u64,
            "addedAt": 1650000000000i64,
            "numMissingParts": 1
        }))
        .unwrap();

        let book = record.book.as_ref().unwrap();
        assert_eq!(book.series_name(), Some("Middle-earth"));
        assert_eq!(book.volume_number, Some(VolumeNumber::Number(1.0)));
        assert_eq!(book.genres, vec!["Fantasy"]);
        assert_eq!(book.narrator_fl().as_deref(), Some("Andy Serkis, Rob Inglis"));
        assert!(record.has_issues());
        assert!(!record.is_missing);
    }

    #[test]
    fn test_plain_and_denormalized_keys_together() {
        let book: BookRecord = serde_json::from_value(json!({
            "title": "Ancillary Justice",
            "series": "Imperial Radch",
            "_series": "Imperial Radch",
            "genres": ["Science Fiction"],
            "_genresList": ["Science Fiction"],
            "authors": ["Ann Leckie"],
            "_authorsList": ["Ann Leckie"],
            "authorFL": "Ann Leckie"
        }))
        .unwrap();

        assert_eq!(book.series_name(), Some("Imperial Radch"));
        assert_eq!(book.genres, vec!["Science Fiction"]);
        assert_eq!(book.authors, vec!["Ann Leckie"]);
    }

    #[test]
    fn test_denormalized_series_used_when_plain_is_empty() {
        let book: BookRecord = serde_json::from_value(json!({
            "series": "",
            "_series": "Discworld"
        }))
        .unwrap();
        assert_eq!(book.series_name(), Some("Discworld"));
    }

    #[test]
    fn test_joined_names_split_when_lists_missing() {
        let book: BookRecord = serde_json::from_value(json!({
            "title": "Provenance",
            "authorFL": "Ann Leckie, Joe Bloggs",
            "narratorFL": "Adjoa Andoh"
        }))
        .unwrap();

        assert_eq!(book.authors, vec!["Ann Leckie", "Joe Bloggs"]);
        assert_eq!(book.narrators, vec!["Adjoa Andoh"]);
        assert_eq!(book.author_fl().as_deref(), Some("Ann Leckie, Joe Bloggs"));
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let record: AudiobookRecord = serde_json::from_value(json!({
            "id": "ab_3",
            "tags": null,
            "tracks": null,
            "book": {
                "title": null,
                "series": null,
                "genres": null,
                "authors": null,
                "narrators": null
            }
        }))
        .unwrap();

        assert!(record.tags.is_empty());
        assert!(record.tracks.is_empty());
        let book = record.book.as_ref().unwrap();
        assert_eq!(book.title, "");
        assert!(book.genres.is_empty());
        assert!(book.authors.is_empty());
        assert_eq!(book.series_name(), None);
    }

    #[test]
    fn test_book_serializes_plain_keys() {
        let mut book = BookRecord::new("Dune");
        book.genres = vec!["Science Fiction".to_string()];
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["genres"][0], "Science Fiction");
        assert!(value.get("_genresList").is_none());

        let back: BookRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_volume_sort_key() {
        assert_eq!(VolumeNumber::Number(2.0).sort_key(), "2");
        assert_eq!(VolumeNumber::Number(2.5).sort_key(), "2.5");
        assert_eq!(VolumeNumber::from("Book 3").sort_key(), "Book 3");
    }

    #[test]
    fn test_empty_series_is_absent() {
        let mut book = BookRecord::new("Standalone");
        book.series = Some(String::new());
        assert_eq!(book.series_name(), None);
        assert_eq!(book.author_fl(), None);
    }

    #[test]
    fn test_projections() {
        let mut book = BookRecord::new("Dune");
        book.authors = vec!["Frank Herbert".to_string()];
        let mut record = AudiobookRecord::new("ab_2", book);
        record.added_at = 42;
        record.tracks = vec![AudioTrack::default(), AudioTrack::default()];

        let minified = ViewMode::Minified.project(&record);
        assert_eq!(minified.id(), "ab_2");
        assert_eq!(minified.added_at(), 42);
        match &minified {
            AudiobookView::Minified(view) => {
                assert_eq!(view.num_tracks, 2);
                assert_eq!(view.book.as_ref().unwrap().author_fl.as_deref(), Some("Frank Herbert"));
            }
            other => panic!("expected minified view, got {:?}", other),
        }

        let expanded = ViewMode::from_minified_flag(false).project(&record);
        assert!(matches!(expanded, AudiobookView::Expanded(_)));
        let value = serde_json::to_value(&expanded).unwrap();
        assert_eq!(value["id"], "ab_2");
        assert_eq!(value["numTracks"], 2);
    }

    #[test]
    fn test_progress_map_lookup() {
        let mut map = UserProgressMap::new();
        map.insert(
            "ab_1",
            UserProgressRecord {
                progress: 0.4,
                ..Default::default()
            },
        );
        assert!(map.progress_record("ab_1").unwrap().is_in_progress());
        assert!(map.progress_record("ab_2").is_none());
    }
}
