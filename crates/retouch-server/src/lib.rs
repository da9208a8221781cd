// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// retouch-server — HTTP front end for the Retouch enhancement pipeline.
//
// Two adapters share one pipeline: `POST /enhance` takes a multipart file
// upload and answers with PNG bytes, `POST /enhance_base64` takes a JSON data
// URI and answers with one. `GET /` serves the static front end.

pub mod api_error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use api_error::ApiError;
pub use routes::router;
pub use server::EnhanceServer;
pub use state::AppState;
