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


//! File classification
//!
//! This module holds the static catalogs of file types a library folder may
//! contain. Classification is by extension only; no file is opened.

pub mod catalog;

// Re-export commonly used types
pub use catalog::{FileKind, SUPPORTED_AUDIO_TYPES, SUPPORTED_EBOOK_TYPES, SUPPORTED_IMAGE_TYPES};
