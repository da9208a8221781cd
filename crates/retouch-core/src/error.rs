// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Retouch.

use thiserror::Error;

/// Top-level error type for all Retouch operations.
///
/// Every variant is request-scoped: a failed request never leaves shared
/// state behind, so the server keeps serving after any of these.
#[derive(Debug, Error)]
pub enum RetouchError {
    // -- Request errors --
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("invalid raster: {0}")]
    InvalidRaster(String),

    // -- Processing errors --
    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Server / configuration --
    #[error("server error: {0}")]
    Server(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RetouchError {
    /// Whether the caller is at fault (maps to HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::Decode(_)
                | Self::MalformedDataUri(_)
                | Self::InvalidRaster(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RetouchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_are_client_errors() {
        assert!(RetouchError::MissingField("image").is_client_error());
        assert!(RetouchError::Decode("bad magic".into()).is_client_error());
        assert!(RetouchError::MalformedDataUri("no comma".into()).is_client_error());
        assert!(RetouchError::InvalidRaster("0x0".into()).is_client_error());
    }

    #[test]
    fn processing_errors_are_not_client_errors() {
        assert!(!RetouchError::Encode("png".into()).is_client_error());
        assert!(!RetouchError::Server("bind".into()).is_client_error());
        let io = std::io::Error::other("disk");
        assert!(!RetouchError::from(io).is_client_error());
    }

    #[test]
    fn display_includes_detail() {
        let err = RetouchError::MissingField("image");
        assert_eq!(err.to_string(), "missing required field: image");
    }
}
