// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retouch — Core types, configuration and error definitions shared across all crates.

pub mod client_messages;
pub mod config;
pub mod data_uri;
pub mod error;
pub mod types;

pub use client_messages::client_message;
pub use config::{ServerConfig, UploadResponse};
pub use data_uri::DataUri;
pub use error::{Result, RetouchError};
pub use types::*;
