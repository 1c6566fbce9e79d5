use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::domain::models::config::ApiConfig;

/// Binds the configured address and serves a built application router.
pub struct HttpServer {
    host: String,
    port: u16,
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ApiConfig, router: Router) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            router,
        }
    }

    /// Serve until the process is terminated.
    pub async fn serve(self) -> Result<()> {
        let addr = self.addr()?;
        let listener = bind(addr).await?;
        axum::serve(listener, self.router)
            .await
            .context("HTTP server terminated abnormally")
    }

    /// Serve until `shutdown` resolves, then drain gracefully.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let listener = bind(addr).await?;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server terminated abnormally")
    }

    fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);
    Ok(listener)
}
