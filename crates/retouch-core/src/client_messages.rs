// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client-facing error messages.
//
// Technical detail stays in the logs; callers only ever see one of the fixed
// strings below, chosen by the endpoint that failed and the error kind.

use crate::error::RetouchError;
use crate::types::Endpoint;

pub const NO_IMAGE_FILE: &str = "No image file provided";
pub const CANNOT_OPEN_IMAGE: &str = "Cannot open image file";
pub const NO_IMAGE_DATA: &str = "No image data provided";
pub const INVALID_IMAGE_DATA: &str = "Invalid image data";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Map an error raised while serving `endpoint` to the message sent back.
pub fn client_message(endpoint: Endpoint, err: &RetouchError) -> &'static str {
    if !err.is_client_error() {
        return INTERNAL_ERROR;
    }

    match (endpoint, err) {
        (Endpoint::Upload, RetouchError::MissingField(_)) => NO_IMAGE_FILE,
        (Endpoint::Upload, _) => CANNOT_OPEN_IMAGE,
        (Endpoint::Base64, RetouchError::MissingField(_)) => NO_IMAGE_DATA,
        (Endpoint::Base64, _) => INVALID_IMAGE_DATA,
    }
}
