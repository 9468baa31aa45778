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


//! Filter token codec
//!
//! Filter values travel inside URLs as `urlencode(base64(utf8(value)))`, so
//! values containing dots, slashes or spaces survive the `group.value` split.
//! Decoding accepts padded and unpadded base64 but rejects anything else.

use crate::error::{LibraryError, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{engine::general_purpose, Engine as _};

/// Standard alphabet, padding optional on decode
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a facet value into its URL-safe token form
pub fn encode_filter_value(value: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(value.as_bytes());
    urlencoding::encode(&encoded).into_owned()
}

/// Decode a token produced by [`encode_filter_value`]
///
/// # Errors
/// `LibraryError::Decoding` when the token is not valid percent-encoding,
/// not valid base64, or the bytes are not UTF-8.
pub fn decode_filter_value(token: &str) -> Result<String> {
    let unescaped = urlencoding::decode(token)
        .map_err(|e| LibraryError::decoding(token, format!("invalid percent-encoding: {}", e)))?;

    let bytes = LENIENT_STANDARD
        .decode(unescaped.as_bytes())
        .map_err(|e| LibraryError::decoding(token, format!("invalid base64: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| LibraryError::decoding(token, format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_token() {
        assert_eq!(decode_filter_value("Tm8gU2VyaWVz").unwrap(), "No Series");
        assert_eq!(encode_filter_value("No Series"), "Tm8gU2VyaWVz");
    }

    #[test]
    fn test_round_trip_awkward_values() {
        for value in ["J.R.R. Tolkien", "Sci-Fi & Fantasy", "a/b?c=d", "Brontë", "In Progress", ""] {
            let token = encode_filter_value(value);
            assert!(!token.contains('/'), "token {} must be path safe", token);
            assert_eq!(decode_filter_value(&token).unwrap(), value);
        }
    }

    #[test]
    fn test_padding_is_optional() {
        // "ab" => "YWI="
        assert_eq!(decode_filter_value("YWI%3D").unwrap(), "ab");
        assert_eq!(decode_filter_value("YWI").unwrap(), "ab");
    }

    #[test]
    fn test_malformed_tokens() {
        let err = decode_filter_value("not*base64!").unwrap_err();
        assert!(matches!(err, LibraryError::Decoding { .. }));
        assert!(err.is_client_error());

        // 0xFF 0xFE is not UTF-8
        assert!(decode_filter_value("%2F%2F4%3D").is_err());
    }
}
