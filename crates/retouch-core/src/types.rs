// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared domain types: job identifiers, server lifecycle, and the JSON wire
// shapes exchanged with clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, RetouchError};

/// Unique identifier attached to each enhancement request for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which adapter received a request. Client-facing messages differ per entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `POST /enhance` — multipart file upload.
    Upload,
    /// `POST /enhance_base64` — JSON body carrying a data URI.
    Base64,
}

/// Lifecycle state of the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Error,
}

/// Body of `POST /enhance_base64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceBase64Request {
    /// A data URI: `data:<mime>;base64,<payload>`.
    pub image: String,
}

impl EnhanceBase64Request {
    /// Parse and validate a raw request body.
    ///
    /// An empty, non-JSON, or non-object body, or one without an `image` key,
    /// is `MissingField`. An `image` that is present but not a string is
    /// `MalformedDataUri`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| RetouchError::MissingField("image"))?;

        let Some(image) = value.get("image") else {
            return Err(RetouchError::MissingField("image"));
        };

        match image.as_str() {
            Some(uri) => Ok(Self {
                image: uri.to_owned(),
            }),
            None => Err(RetouchError::MalformedDataUri(
                "`image` must be a string".into(),
            )),
        }
    }
}

/// Successful response of `POST /enhance_base64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceBase64Response {
    /// Always `data:image/png;base64,<payload>`.
    pub image: String,
}

/// JSON error object returned with every 4xx/5xx.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub enhancer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_image() {
        let req = EnhanceBase64Request::from_json(br#"{"image":"data:image/png;base64,AAAA"}"#)
            .expect("valid body");
        assert_eq!(req.image, "data:image/png;base64,AAAA");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let req = EnhanceBase64Request::from_json(br#"{"image":"a,b","extra":1}"#).unwrap();
        assert_eq!(req.image, "a,b");
    }

    #[test]
    fn missing_key_is_missing_field() {
        let err = EnhanceBase64Request::from_json(br#"{"picture":"x"}"#).unwrap_err();
        assert!(matches!(err, RetouchError::MissingField("image")));
    }

    #[test]
    fn empty_and_non_json_bodies_are_missing_field() {
        for body in [&b""[..], b"not json", b"[]", b"42", b"{}"] {
            let err = EnhanceBase64Request::from_json(body).unwrap_err();
            assert!(
                matches!(err, RetouchError::MissingField(_)),
                "body {:?} gave {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn non_string_image_is_malformed() {
        let err = EnhanceBase64Request::from_json(br#"{"image":12}"#).unwrap_err();
        assert!(matches!(err, RetouchError::MalformedDataUri(_)));
    }

    #[test]
    fn error_body_serializes_with_error_key() {
        let json = serde_json::to_string(&ErrorBody::new("No image data provided")).unwrap();
        assert_eq!(json, r#"{"error":"No image data provided"}"#);
    }

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }
}
