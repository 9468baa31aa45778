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


//! Library snapshots
//!
//! A snapshot is a JSON export of a library plus one user's progress:
//!
//! ```json
//! {
//!   "audiobooks": [ { "id": "ab_1", "book": { "title": "..." }, ... } ],
//!   "progress": { "ab_1": { "isRead": false, "progress": 0.4, "lastUpdate": 1650000000000 } }
//! }
//! ```
//!
//! Loading is the only file access in the crate; the views in
//! [`crate::library`] work on the loaded records.

use crate::error::Result;
use crate::library::{AudiobookRecord, UserProgressMap};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySnapshot {
    pub audiobooks: Vec<AudiobookRecord>,
    pub progress: UserProgressMap,
}

impl LibrarySnapshot {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            audiobooks = snapshot.audiobooks.len(),
            progress_records = snapshot.progress.len(),
            "Loaded library snapshot"
        );
        Ok(snapshot)
    }
}
