// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Route table and middleware stack.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// | route                  | handler                          |
/// |------------------------|----------------------------------|
/// | `GET /`                | `<static_dir>/index.html`        |
/// | `GET /static/*`        | files under `<static_dir>`       |
/// | `GET /health`          | [`handlers::health`]             |
/// | `POST /enhance`        | [`handlers::enhance_upload`]     |
/// | `POST /enhance_base64` | [`handlers::enhance_base64`]     |
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir))
        .route("/health", get(handlers::health))
        .route("/enhance", post(handlers::enhance_upload))
        .route("/enhance_base64", post(handlers::enhance_base64))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
