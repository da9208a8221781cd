// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Server lifecycle — bind, serve in a background task, graceful stop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use retouch_core::error::{Result, RetouchError};
use retouch_core::{ServerConfig, ServerStatus};
use retouch_image::Enhancer;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::routes::router;
use crate::state::AppState;

/// The enhancement HTTP server.
///
/// Created in `Stopped` state. [`start`](Self::start) binds the listener and
/// serves on a Tokio task; [`stop`](Self::stop) lets in-flight requests
/// finish and waits for the task.
pub struct EnhanceServer {
    state: AppState,
    status: ServerStatus,
    /// Signals the serve task to shut down gracefully.
    shutdown_signal: Arc<Notify>,
    task_handle: Option<JoinHandle<Result<()>>>,
    /// Actual bound address (differs from config when port 0 was requested).
    local_addr: Option<SocketAddr>,
}

impl EnhanceServer {
    pub fn new(config: ServerConfig, enhancer: Arc<dyn Enhancer>) -> Self {
        Self {
            state: AppState::new(config, enhancer),
            status: ServerStatus::Stopped,
            shutdown_signal: Arc::new(Notify::new()),
            task_handle: None,
            local_addr: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// A router over this server's state, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind the configured address and start serving.
    ///
    /// Returns the bound address. Calling `start` on a running server is a no-op.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        if let (ServerStatus::Running, Some(addr)) = (self.status, self.local_addr) {
            debug!(%addr, "server already running");
            return Ok(addr);
        }

        self.status = ServerStatus::Starting;
        let (listener, addr) = match self.bind().await {
            Ok(bound) => bound,
            Err(err) => {
                self.status = ServerStatus::Error;
                return Err(err);
            }
        };

        let app = self.router();
        let shutdown = Arc::clone(&self.shutdown_signal);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
                .map_err(|err| RetouchError::Server(format!("serve: {err}")))
        });

        info!(%addr, enhancer = self.state.enhancer.name(), "enhancement server listening");
        self.task_handle = Some(handle);
        self.local_addr = Some(addr);
        self.status = ServerStatus::Running;
        Ok(addr)
    }

    async fn bind(&self) -> Result<(TcpListener, SocketAddr)> {
        let bind_addr = self.state.config.socket_addr();
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|err| RetouchError::Server(format!("bind {bind_addr}: {err}")))?;
        let addr = listener
            .local_addr()
            .map_err(|err| RetouchError::Server(format!("local address: {err}")))?;
        Ok((listener, addr))
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != ServerStatus::Running {
            return Ok(());
        }

        info!(addr = ?self.local_addr, "stopping enhancement server");
        self.shutdown_signal.notify_one();

        let outcome = match self.task_handle.take() {
            Some(handle) => handle
                .await
                .map_err(|err| RetouchError::Server(format!("task join: {err}")))
                .and_then(|served| served),
            None => Ok(()),
        };

        self.local_addr = None;
        self.status = if outcome.is_ok() {
            ServerStatus::Stopped
        } else {
            ServerStatus::Error
        };
        info!("enhancement server stopped");
        outcome
    }

    /// Run until Ctrl-C, then shut down gracefully.
    pub async fn serve(mut self) -> Result<()> {
        self.start().await?;
        tokio::signal::ctrl_c().await?;
        info!("shutdown requested");
        self.stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_image::SharpenEnhancer;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn ephemeral_config() -> ServerConfig {
        ServerConfig {
            port: 0,
            ..ServerConfig::default()
        }
    }

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn new_server_is_stopped() {
        let server = EnhanceServer::new(ephemeral_config(), Arc::new(SharpenEnhancer::default()));
        assert_eq!(server.status(), ServerStatus::Stopped);
        assert!(server.local_addr().is_none());
        assert_eq!(server.config().port, 0);
    }

    #[tokio::test]
    async fn start_serve_stop() {
        let mut server =
            EnhanceServer::new(ephemeral_config(), Arc::new(SharpenEnhancer::default()));
        let addr = server.start().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Running);
        assert_ne!(addr.port(), 0);

        // Second start is a no-op returning the same address.
        assert_eq!(server.start().await.unwrap(), addr);

        let response = get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
        assert!(response.contains(r#""enhancer":"sharpen-3x3""#));

        server.stop().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Stopped);
        assert!(server.local_addr().is_none());
    }

    #[tokio::test]
    async fn stop_when_not_running_is_noop() {
        let mut server =
            EnhanceServer::new(ephemeral_config(), Arc::new(SharpenEnhancer::default()));
        server.stop().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Stopped);
    }

    #[tokio::test]
    async fn bind_conflict_reports_server_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            port: taken.local_addr().unwrap().port(),
            ..ServerConfig::default()
        };
        let mut server = EnhanceServer::new(config, Arc::new(SharpenEnhancer::default()));
        let err = server.start().await.unwrap_err();
        assert!(matches!(err, RetouchError::Server(_)));
        assert_eq!(server.status(), ServerStatus::Error);
    }

    #[tokio::test]
    async fn failed_start_can_be_retried() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let config = ServerConfig {
            port,
            ..ServerConfig::default()
        };
        let mut server = EnhanceServer::new(config, Arc::new(SharpenEnhancer::default()));
        assert!(server.start().await.is_err());
        assert_eq!(server.status(), ServerStatus::Error);
        assert!(server.local_addr().is_none());

        drop(taken);
        let addr = server.start().await.unwrap();
        assert_eq!(addr.port(), port);
        assert_eq!(server.status(), ServerStatus::Running);
        server.stop().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Stopped);
    }
}
