//! Error types for Shelf Core
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! The library views themselves are infallible apart from filter token decoding;
//! the remaining variants belong to the loaders that sit around the core
//! (snapshots, configuration).
//!
//! ## Error Categories
//!
//! ### Client Input (invalid request upstream)
//! - Malformed filter token → `Decoding`
//!
//! ### Configuration
//! - Unusable settings → `InvalidConfiguration`
//! - TOML syntax/shape problems → `TomlError` (via `#[from]`)
//!
//! ### Snapshot Loading
//! - Missing files, unreadable JSON → `IoError`, `SerdeJsonError`
//!
//! Items with absent nested fields (no book, no series) are never an error:
//! every predicate treats absence as "no match".

use thiserror::Error;

/// Result type alias using our LibraryError type
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Main error type for Shelf Core
#[derive(Error, Debug)]
pub enum LibraryError {
    // ===== Client Input Errors =====

    /// Filter token could not be decoded (bad percent-encoding, bad base64 or non UTF-8 bytes)
    #[error("Failed to decode filter token '{token}': {reason}")]
    Decoding {
        /// The raw token as received
        token: String,
        reason: String,
    },

    // ===== Configuration Errors =====

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ===== External Library Errors =====

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// TOML configuration parse error
    #[error("Configuration parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LibraryError {
    /// Create a Decoding error for a raw token
    pub fn decoding<T: Into<String>, R: ToString>(token: T, reason: R) -> Self {
        LibraryError::Decoding {
            token: token.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidConfiguration error with a message
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        LibraryError::InvalidConfiguration(message.into())
    }

    /// Check if error was caused by the caller's request rather than the library
    ///
    /// Returns `true` for errors an API layer should answer with a "bad request"
    /// style response. These are never worth retrying with the same input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, LibraryError::Decoding { .. })
    }

    /// Check if error came from loading settings
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LibraryError::InvalidConfiguration(_) | LibraryError::TomlError(_)
        )
    }

    /// Get user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            LibraryError::Decoding { .. } => {
                "The filter in this link is damaged. Please pick the filter again.".to_string()
            }
            LibraryError::InvalidConfiguration(message) => {
                format!("Settings problem: {}. Please check your configuration file.", message)
            }
            _ => self.to_string(),
        }
    }
}

// ===== IMPLEMENTATION NOTES =====
//
// 1. Decoding failures carry the raw token so the request can be logged,
//    but `user_message()` never echoes it back.
// 2. Library views do not return `Result` unless they decode a token; a missing
//    `book` or series is a non-match, not a failure.
// 3. Use anyhow only at the binary boundary:
//      ```rust
//      use anyhow::Context;
//      let snapshot = LibrarySnapshot::load(path)
//          .with_context(|| format!("Failed to load library: {}", path.display()))?;
//      ```

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoding_is_client_error() {
        let err = LibraryError::decoding("%%%", "invalid percent-encoding");
        assert!(err.is_client_error());
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("%%%"));
        assert!(!err.user_message().contains("%%%"));
    }

    #[test]
    fn test_config_error_category() {
        let err = LibraryError::invalid_config("shelf_limit must be at least 1");
        assert!(err.is_config_error());
        assert!(!err.is_client_error());
        assert!(err.user_message().contains("shelf_limit"));
    }
}
