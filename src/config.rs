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


//! View configuration
//!
//! Defaults for the home-screen shelves, read from a TOML file:
//!
//! ```toml
//! shelf_limit = 12
//! view_mode = "minified"
//! ```
//!
//! Every key is optional.

use crate::error::{LibraryError, Result};
use crate::library::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default number of books per shelf
pub const DEFAULT_SHELF_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Maximum books on each recency shelf
    pub shelf_limit: usize,
    /// Projection used when the caller does not ask for one
    pub view_mode: ViewMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            shelf_limit: DEFAULT_SHELF_LIMIT,
            view_mode: ViewMode::default(),
        }
    }
}

impl ViewConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ViewConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "Loaded view configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.shelf_limit == 0 {
            return Err(LibraryError::invalid_config("shelf_limit must be at least 1"));
        }
        Ok(())
    }
}
