// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error responses. Every failure leaves the server as `{"error": "..."}`
// with a fixed, endpoint-specific message; the technical cause is logged.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use retouch_core::types::{Endpoint, ErrorBody, JobId};
use retouch_core::{RetouchError, client_message};
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Convert a pipeline/request error raised by `endpoint` while handling
    /// `job`, logging the detail that the client will not see.
    pub fn from_retouch(endpoint: Endpoint, job: JobId, err: &RetouchError) -> Self {
        let status = if err.is_client_error() {
            warn!(%job, ?endpoint, error = %err, "rejecting request");
            StatusCode::BAD_REQUEST
        } else {
            error!(%job, ?endpoint, error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, client_message(endpoint, err))
    }

    /// The request body exceeded `max_upload_bytes`.
    pub fn payload_too_large(job: JobId) -> Self {
        warn!(%job, "request body exceeds upload limit");
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}
