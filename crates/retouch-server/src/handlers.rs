// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request handlers for the two enhancement adapters and the health probe.
//
// Both adapters funnel into `run_enhancement`, which waits for a job permit
// and then runs decode -> sharpen -> PNG encode on a blocking worker thread.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use retouch_core::config::UploadResponse;
use retouch_core::types::{
    EnhanceBase64Request, EnhanceBase64Response, Endpoint, HealthBody, JobId,
};
use retouch_core::{DataUri, Result, RetouchError};
use retouch_image::enhance_bytes;
use tracing::{debug, info, instrument};

use crate::api_error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

// ---------------------------------------------------------------------------
// POST /enhance
// ---------------------------------------------------------------------------

/// File-upload adapter: multipart field `image` in, PNG bytes out.
#[instrument(skip_all, fields(job))]
pub async fn enhance_upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Response, ApiError> {
    let job = JobId::new();
    tracing::Span::current().record("job", tracing::field::display(job));
    let fail = |err: RetouchError| ApiError::from_retouch(Endpoint::Upload, job, &err);

    let multipart = multipart.map_err(|rejection| {
        debug!(%job, reason = %rejection.body_text(), "not a multipart request");
        fail(RetouchError::MissingField(IMAGE_FIELD))
    })?;

    let data = read_image_field(multipart, job).await?;
    info!(%job, bytes = data.len(), "image upload received");

    let png = run_enhancement(&state, data.to_vec()).await.map_err(fail)?;

    let body = match state.config.upload_response {
        UploadResponse::Enhanced => png,
        UploadResponse::BlankFile => {
            debug!(%job, enhanced_len = png.len(), "returning blank placeholder");
            tokio::fs::read(state.config.blank_png_path())
                .await
                .map_err(|err| fail(RetouchError::Io(err)))?
        }
    };

    Ok(([(header::CONTENT_TYPE, "image/png")], body).into_response())
}

/// Pull the bytes of the first `image` part, skipping any other fields.
async fn read_image_field(
    mut multipart: Multipart,
    job: JobId,
) -> std::result::Result<Bytes, ApiError> {
    let missing = || {
        ApiError::from_retouch(
            Endpoint::Upload,
            job,
            &RetouchError::MissingField(IMAGE_FIELD),
        )
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(missing()),
            Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(ApiError::payload_too_large(job));
            }
            Err(err) => {
                debug!(%job, reason = %err.body_text(), "malformed multipart stream");
                return Err(missing());
            }
        };

        // Only a file part counts; a plain form value named `image` does not.
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            debug!(
                %job,
                name = ?field.name(),
                file_name = ?field.file_name(),
                "skipping multipart field"
            );
            continue;
        }

        return match field.bytes().await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::payload_too_large(job))
            }
            Err(err) => {
                debug!(%job, reason = %err.body_text(), "failed to read image field");
                Err(missing())
            }
        };
    }
}

// ---------------------------------------------------------------------------
// POST /enhance_base64
// ---------------------------------------------------------------------------

/// Base64 adapter: `{"image": "<data uri>"}` in, `{"image": "data:image/png;base64,..."}` out.
#[instrument(skip_all, fields(job))]
pub async fn enhance_base64(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<Json<EnhanceBase64Response>, ApiError> {
    let job = JobId::new();
    tracing::Span::current().record("job", tracing::field::display(job));
    let fail = |err: RetouchError| ApiError::from_retouch(Endpoint::Base64, job, &err);

    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::payload_too_large(job));
        }
        Err(rejection) => {
            debug!(%job, reason = %rejection.body_text(), "unreadable request body");
            return Err(fail(RetouchError::MissingField("image")));
        }
    };

    let request = EnhanceBase64Request::from_json(&body).map_err(fail)?;
    let uri = DataUri::parse(&request.image).map_err(fail)?;
    info!(
        %job,
        mime = uri.mime.as_deref().unwrap_or("unspecified"),
        bytes = uri.payload.len(),
        "data URI received"
    );

    let png = run_enhancement(&state, uri.payload).await.map_err(fail)?;

    Ok(Json(EnhanceBase64Response {
        image: DataUri::png(&png),
    }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".into(),
        enhancer: state.enhancer.name().to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Shared pipeline driver
// ---------------------------------------------------------------------------

/// Decode, enhance and PNG-encode `data` off the async runtime.
///
/// Waits for a job permit first; the permit is held until the blocking work
/// finishes so `max_concurrent_jobs` bounds actual CPU work.
async fn run_enhancement(state: &AppState, data: Vec<u8>) -> Result<Vec<u8>> {
    let permit = Arc::clone(&state.jobs)
        .acquire_owned()
        .await
        .map_err(|err| RetouchError::Server(format!("job limiter closed: {err}")))?;
    let enhancer = Arc::clone(&state.enhancer);

    tokio::task::spawn_blocking(move || {
        let _permit = permit;
        enhance_bytes(enhancer.as_ref(), &data)
    })
    .await
    .map_err(|err| RetouchError::Server(format!("enhancement task failed: {err}")))?
}
