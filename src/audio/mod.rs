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


//! Audio track descriptors
//!
//! Stream probing itself happens outside this crate. This module only shapes
//! the prober's output into the descriptor attached to each track.

pub mod probe;

// Re-export commonly used types for convenience
pub use probe::{AudioFileMetadata, AudioProbeData, Chapter, RawProbe};
