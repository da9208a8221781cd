// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetouchError};

/// What `POST /enhance` sends back on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadResponse {
    /// The enhanced image as PNG bytes.
    #[default]
    Enhanced,
    /// `<static_dir>/blank.png`, regardless of the computed result. Matches
    /// the behaviour of earlier deployments that front ends may rely on.
    BlankFile,
}

/// Runtime settings for the HTTP server.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (default 127.0.0.1).
    pub bind_address: IpAddr,
    /// TCP port (default 5000). Port 0 picks a free port.
    pub port: u16,
    /// Verbose logging.
    pub debug: bool,
    /// Directory holding `index.html`, `blank.png` and other front-end assets.
    pub static_dir: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Number of images processed at once; further requests wait.
    pub max_concurrent_jobs: usize,
    /// Body returned by the file-upload endpoint.
    pub upload_response: UploadResponse,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            debug: false,
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 32 * 1024 * 1024,
            max_concurrent_jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            upload_response: UploadResponse::Enhanced,
        }
    }
}

impl ServerConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read(path.as_ref())?;
        let config: Self = serde_json::from_slice(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(RetouchError::Config("max_upload_bytes must be > 0".into()));
        }
        if self.max_concurrent_jobs == 0 {
            return Err(RetouchError::Config(
                "max_concurrent_jobs must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Socket address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Default log filter derived from the `debug` flag.
    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    /// Path of the placeholder returned in [`UploadResponse::BlankFile`] mode.
    pub fn blank_png_path(&self) -> PathBuf {
        self.static_dir.join("blank.png")
    }
}
