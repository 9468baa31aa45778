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


//! Supported file type catalogs
//!
//! Read-only extension sets used to classify files found in a library folder.
//! Extensions are stored lowercase and without the leading dot.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cover art and other image files
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Audio files that can be tracks of an audiobook
pub const SUPPORTED_AUDIO_TYPES: &[&str] = &["m4b", "mp3", "m4a", "flac", "opus", "mp4", "aac"];

/// Ebook and comic companions
pub const SUPPORTED_EBOOK_TYPES: &[&str] = &["epub", "pdf", "mobi", "azw3", "cbr", "cbz"];

/// Classification of a library file by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Audio,
    Ebook,
    /// Anything not in the catalogs (metadata files, cue sheets, ...)
    Unknown,
}

impl FileKind {
    /// Classify from an extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_lowercase();
        let ext = ext.as_str();

        if SUPPORTED_AUDIO_TYPES.contains(&ext) {
            FileKind::Audio
        } else if SUPPORTED_IMAGE_TYPES.contains(&ext) {
            FileKind::Image
        } else if SUPPORTED_EBOOK_TYPES.contains(&ext) {
            FileKind::Ebook
        } else {
            FileKind::Unknown
        }
    }

    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileKind::Unknown)
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, FileKind::Audio)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FileKind::Image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileKind::from_extension("m4b"), FileKind::Audio);
        assert_eq!(FileKind::from_extension(".FLAC"), FileKind::Audio);
        assert_eq!(FileKind::from_extension("jpeg"), FileKind::Image);
        assert_eq!(FileKind::from_extension("azw3"), FileKind::Ebook);
        assert_eq!(FileKind::from_extension("nfo"), FileKind::Unknown);
        assert_eq!(FileKind::from_extension(""), FileKind::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert!(FileKind::from_path(Path::new("/books/Dune/01 - Part One.MP3")).is_audio());
        assert!(FileKind::from_path(Path::new("cover.webp")).is_image());
        assert_eq!(FileKind::from_path(Path::new("README")), FileKind::Unknown);
    }

    #[test]
    fn test_catalogs_are_disjoint() {
        for ext in SUPPORTED_AUDIO_TYPES {
            assert!(!SUPPORTED_IMAGE_TYPES.contains(ext));
            assert!(!SUPPORTED_EBOOK_TYPES.contains(ext));
        }
        for ext in SUPPORTED_IMAGE_TYPES {
            assert!(!SUPPORTED_EBOOK_TYPES.contains(ext));
        }
    }
}
