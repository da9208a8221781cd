// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// State shared by all request handlers.

use std::sync::Arc;

use retouch_core::ServerConfig;
use retouch_image::Enhancer;
use tokio::sync::Semaphore;

/// Cloned into every handler by axum. Holds nothing request-specific.
#[derive(Clone)]
pub struct AppState {
    /// Settings the server was started with.
    pub config: Arc<ServerConfig>,
    /// The enhancement implementation all requests go through.
    pub enhancer: Arc<dyn Enhancer>,
    /// Bounds how many images are decoded/convolved/encoded at once.
    pub jobs: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: ServerConfig, enhancer: Arc<dyn Enhancer>) -> Self {
        let jobs = Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1)));
        Self {
            config: Arc::new(config),
            enhancer,
            jobs,
        }
    }
}
