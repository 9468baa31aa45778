//! Shelf Core
//!
//! Filtering, faceting, series grouping, recency shelves and statistics over
//! an in-memory audiobook library.
//!
//! # Modules
//!
//! - [`library`] - the pure library views
//! - [`audio`] - per-track probe descriptors
//! - [`file`] - supported file type catalogs
//! - [`config`] - TOML view configuration
//! - [`snapshot`] - JSON library snapshots
//! - [`error`] - error types

pub mod audio;
pub mod config;
pub mod error;
pub mod file;
pub mod library;
pub mod snapshot;

pub use config::ViewConfig;
pub use error::{LibraryError, Result};
pub use snapshot::LibrarySnapshot;
