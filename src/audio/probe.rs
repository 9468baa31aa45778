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


//! Audio probe descriptors
//!
//! Turns already-extracted stream probe output into the per-track descriptor
//! stored on an [`AudioTrack`](crate::library::models::AudioTrack). Nothing
//! here spawns a prober or reads a file: callers hand in the probe result.
//!
//! # Probe Fields
//! - Container: format, duration, size, bit rate
//! - Audio stream: codec, time base, language, channel layout, channels, sample rate
//! - Video stream: only used to detect embedded cover art
//! - `file_tag_*` keys: container tags (title, artist, track, ...)
//! - Chapters: `[(id, start, end, title)]`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Video codecs that mean "this stream is a picture, not a video"
const COVER_ART_CODECS: &[&str] = &["mjpeg", "jpeg", "png"];

/// Prefix of container tag keys in probe output
const FILE_TAG_PREFIX: &str = "file_tag_";

/// Raw probe output as produced by the external prober
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProbe {
    pub format: Option<String>,
    pub duration: Option<f64>,
    pub size: Option<u64>,
    pub bit_rate: Option<u64>,
    #[serde(default)]
    pub audio_stream: RawAudioStream,
    pub video_stream: Option<RawVideoStream>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Everything else, including the `file_tag_*` keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAudioStream {
    pub codec: Option<String>,
    pub bit_rate: Option<u64>,
    pub time_base: Option<String>,
    pub language: Option<String>,
    pub channel_layout: Option<String>,
    pub channels: Option<u32>,
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoStream {
    pub codec: Option<String>,
}

/// Chapter marker structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    pub title: String,
}

impl Chapter {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Container tags keyed by their name without the `file_tag_` prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFileMetadata {
    pub tags: BTreeMap<String, String>,
}

impl AudioFileMetadata {
    /// Collect every non-empty `file_tag_*` entry from raw probe keys
    pub fn from_probe_keys(extra: &BTreeMap<String, Value>) -> Self {
        let tags = extra
            .iter()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(FILE_TAG_PREFIX)?;
                let text = match value {
                    Value::String(s) if !s.is_empty() => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((name.to_string(), text))
            })
            .collect();

        Self { tags }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn artist(&self) -> Option<&str> {
        self.get("artist")
    }

    pub fn album(&self) -> Option<&str> {
        self.get("album")
    }

    /// Raw track tag, e.g. `"3/10"` or `"3"`
    pub fn track(&self) -> Option<&str> {
        self.get("track")
    }
}

/// Per-track descriptor built from probe output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProbeData {
    /// Codec of an attached picture stream, if any
    pub embedded_cover_art: Option<String>,
    pub format: Option<String>,
    pub duration: Option<f64>,
    pub size: Option<u64>,
    pub bit_rate: Option<u64>,
    pub codec: Option<String>,
    pub time_base: Option<String>,
    pub language: Option<String>,
    pub channel_layout: Option<String>,
    pub channels: Option<u32>,
    pub sample_rate: Option<u32>,
    pub chapters: Vec<Chapter>,
    pub audio_file_metadata: AudioFileMetadata,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
}

impl AudioProbeData {
    /// Build the descriptor from raw probe output
    pub fn from_raw(raw: RawProbe) -> Self {
        let embedded_cover_art = raw
            .video_stream
            .as_ref()
            .and_then(|video| video.codec.as_deref())
            .filter(|codec| COVER_ART_CODECS.contains(codec))
            .map(str::to_string);

        let audio_file_metadata = AudioFileMetadata::from_probe_keys(&raw.extra);
        let (track_number, track_total) = audio_file_metadata
            .track()
            .map(parse_track_tag)
            .unwrap_or((None, None));

        let stream = raw.audio_stream;
        Self {
            embedded_cover_art,
            format: raw.format,
            duration: raw.duration,
            size: raw.size,
            // Container bit rate is only a fallback; it includes cover art and overhead
            bit_rate: stream.bit_rate.filter(|rate| *rate > 0).or(raw.bit_rate),
            codec: stream.codec,
            time_base: stream.time_base,
            language: stream.language,
            channel_layout: stream.channel_layout,
            channels: stream.channels,
            sample_rate: stream.sample_rate,
            chapters: raw.chapters,
            audio_file_metadata,
            track_number,
            track_total,
        }
    }

    /// Parse probe output from its JSON form
    pub fn from_json(value: Value) -> crate::error::Result<Self> {
        let raw: RawProbe = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    pub fn has_embedded_cover_art(&self) -> bool {
        self.embedded_cover_art.is_some()
    }
}

/// Split a track tag like `"3/10"` into number and total
fn parse_track_tag(tag: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = tag.split('/').map(|part| part.trim().parse::<u32>().ok());
    let number = parts.next().flatten();
    let total = parts.next().flatten();
    (number, total)
}
