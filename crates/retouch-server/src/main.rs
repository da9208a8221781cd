// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retouch — image enhancement over HTTP.
//
// Entry point. Loads the optional JSON config given as the first argument,
// initialises logging, and serves until Ctrl-C.
//
//     retouch [config.json]

use std::sync::Arc;

use retouch_core::ServerConfig;
use retouch_image::SharpenEnhancer;
use retouch_server::EnhanceServer;

#[tokio::main]
async fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match ServerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("retouch: cannot load config {path}: {e}");
                std::process::exit(2);
            }
        },
        None => ServerConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level())),
        )
        .init();

    tracing::info!(
        addr = %config.socket_addr(),
        static_dir = %config.static_dir.display(),
        upload_response = ?config.upload_response,
        "Retouch starting"
    );

    let server = EnhanceServer::new(config, Arc::new(SharpenEnhancer::default()));
    if let Err(e) = server.serve().await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}
