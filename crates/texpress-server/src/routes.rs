//! HTTP routes for the texpress server.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use texpress_core::{Error as CoreError, LatexCompiler};
use tower_http::trace::TraceLayer;

use crate::error::{ServerError, ServerResult};
use crate::protocol::CompileRequest;

/// Application state shared across handlers.
pub struct AppState {
    /// Compile pipeline; cheap to share, every call uses its own scratch files.
    pub compiler: LatexCompiler,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route("/compile", post(compile_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Compile a LaTeX document and return the PDF.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that every malformed body gets the same 400 response regardless of its
/// content type. Body read failures, including an exceeded size limit, are
/// answered with a JSON error as well.
async fn compile_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Response> {
    tracing::info!("Received compilation request");

    let body = body.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection);
        ServerError::from(rejection)
    })?;

    let request: CompileRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("JSON parsing failed: {}", e);
        ServerError::from(e)
    })?;

    match state.compiler.compile(&request.latex_code).await {
        Ok(doc) => {
            tracing::info!(
                request_id = %doc.request_id,
                bytes = doc.pdf.len(),
                elapsed_ms = doc.duration.as_millis() as u64,
                "Successfully compiled LaTeX to PDF"
            );
            Ok(([(header::CONTENT_TYPE, "application/pdf")], doc.pdf).into_response())
        }
        Err(err) => {
            log_failure(&err);
            Err(err.into())
        }
    }
}

/// Record the full cause server-side; clients only see the public message.
fn log_failure(err: &CoreError) {
    match err {
        CoreError::CompilerFailed(diagnostic) => {
            tracing::error!(
                kind = %diagnostic.kind,
                source = ?diagnostic.source,
                errors = diagnostic.errors().len(),
                "Compiler failed:\n{}",
                diagnostic.text
            );
        }
        CoreError::ReadOutput { .. } => {
            tracing::error!("Compiler exited successfully but produced no readable PDF: {}", err);
        }
        CoreError::Timeout(_) => {
            tracing::warn!("{}", err);
        }
        _ => {
            tracing::error!("{}", err);
        }
    }
}

