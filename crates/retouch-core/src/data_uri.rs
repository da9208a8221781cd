// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data URI handling — `data:<mime>;base64,<payload>` parsing and PNG encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Result, RetouchError};

/// Prefix of every data URI this service emits.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type from the header, if one was given (`image/jpeg`, ...).
    pub mime: Option<String>,
    /// Decoded payload bytes.
    pub payload: Vec<u8>,
}

impl DataUri {
    /// Parse a data URI.
    ///
    /// Everything before the first comma is the header; it is not validated
    /// beyond extracting the MIME type. Characters outside the base64
    /// alphabet in the payload (line breaks, stray punctuation, further
    /// commas) are discarded before decoding.
    pub fn parse(uri: &str) -> Result<Self> {
        let (header, encoded) = uri.split_once(',').ok_or_else(|| {
            RetouchError::MalformedDataUri("expected `<header>,<payload>`".into())
        })?;

        let compact: Vec<u8> = encoded.bytes().filter(|&b| is_base64_byte(b)).collect();
        let payload = STANDARD
            .decode(&compact)
            .map_err(|err| RetouchError::MalformedDataUri(format!("base64 payload: {err}")))?;

        Ok(Self {
            mime: mime_from_header(header),
            payload,
        })
    }

    /// Build a `data:image/png;base64,...` string for already-encoded PNG bytes.
    pub fn png(bytes: &[u8]) -> String {
        let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + bytes.len().div_ceil(3) * 4);
        uri.push_str(PNG_DATA_URI_PREFIX);
        STANDARD.encode_string(bytes, &mut uri);
        uri
    }
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

/// `data:image/jpeg;base64` -> `image/jpeg`. Empty media types yield `None`.
fn mime_from_header(header: &str) -> Option<String> {
    let media = header.strip_prefix("data:").unwrap_or(header);
    let mime = media.split(';').next().unwrap_or("").trim();
    (!mime.is_empty()).then(|| mime.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_png_data_uri() {
        let uri = DataUri::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.mime.as_deref(), Some("image/png"));
        assert_eq!(uri.payload, b"hello");
    }

    #[test]
    fn header_is_not_validated() {
        let uri = DataUri::parse("whatever,aGVsbG8=").unwrap();
        assert_eq!(uri.mime.as_deref(), Some("whatever"));
        assert_eq!(uri.payload, b"hello");

        let bare = DataUri::parse(",aGVsbG8=").unwrap();
        assert_eq!(bare.mime, None);
    }

    #[test]
    fn stray_characters_in_payload_are_discarded() {
        for payload in ["aGVs!bG8=", "aGVs,bG8=", "aG Vs\nbG8=", "a-G_V*sbG8="] {
            let uri = DataUri::parse(&format!("data:image/png;base64,{payload}")).unwrap();
            assert_eq!(uri.payload, b"hello", "payload {payload:?}");
        }
    }

    #[test]
    fn missing_comma_is_malformed() {
        let err = DataUri::parse("data:image/png;base64").unwrap_err();
        assert!(matches!(err, RetouchError::MalformedDataUri(_)));
    }

    #[test]
    fn garbage_payload_is_malformed() {
        // Filtering leaves "notbase64": nine symbols, not a valid length.
        let err = DataUri::parse("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, RetouchError::MalformedDataUri(_)));
    }

    #[test]
    fn payload_of_only_punctuation_decodes_to_nothing() {
        let uri = DataUri::parse("data:image/png;base64,@@##").unwrap();
        assert!(uri.payload.is_empty());
    }

    #[test]
    fn png_uri_has_prefix_and_decodes_back() {
        let uri = DataUri::png(&[0x89, b'P', b'N', b'G']);
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        let parsed = DataUri::parse(&uri).unwrap();
        assert_eq!(parsed.mime.as_deref(), Some("image/png"));
        assert_eq!(parsed.payload, vec![0x89, b'P', b'N', b'G']);
    }
}
