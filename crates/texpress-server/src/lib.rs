//! texpress HTTP server.
//!
//! Exposes the compile pipeline over HTTP.
//!
//! # Routes
//!
//! - `POST /compile`: `{"latex_code": "..."}` in, `application/pdf` out
//! - `GET /health`: liveness and version

pub mod error;
pub mod protocol;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use texpress_core::{CompilerConfig, LatexCompiler};

pub use error::{ServerError, ServerResult};
pub use protocol::{CompileRequest, ErrorResponse};
pub use routes::{AppState, create_router};

/// Default request body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Engine and scratch directory settings.
    pub compiler: CompilerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            compiler: CompilerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse `host:port` into a socket address.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Start the compile server and run until Ctrl+C.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let compiler = LatexCompiler::new(&config.compiler)?;

    match compiler.toolchain().version() {
        Ok(version) => tracing::info!("Using {} ({})", compiler.toolchain().program().display(), version),
        Err(e) => tracing::warn!("Could not determine compiler version: {}", e),
    }
    tracing::info!("Scratch directory: {}", compiler.scratch().path().display());
    if let Some(limit) = compiler.timeout() {
        tracing::info!("Compilation timeout: {}s", limit.as_secs());
    }

    let state = Arc::new(AppState {
        compiler,
        max_body_bytes: config.max_body_bytes,
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!("LaTeX compiler service listening on http://{}", addr);

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
