//! Error types for the texpress server.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::protocol::ErrorResponse;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request body was not a valid compile request.
    #[error("invalid request body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Compilation pipeline error.
    #[error("{0}")]
    Compile(#[from] texpress_core::Error),

    /// Request body could not be read, usually because it exceeds the limit.
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// The listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// IO error while serving connections.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid listen address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ServerError {
    /// HTTP status reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    ///
    /// Only compiler diagnostics are passed through; everything else is a
    /// fixed phrase.
    pub fn client_message(&self) -> String {
        use texpress_core::Error as CoreError;

        match self {
            Self::InvalidJson(_) => "Invalid JSON format".to_string(),
            Self::Body(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "Request body too large".to_string()
            }
            Self::Body(_) => "Failed to read request body".to_string(),
            Self::Compile(err) => match err {
                CoreError::CompilerFailed(diagnostic) => diagnostic.text.clone(),
                CoreError::WriteSource { .. } => "Failed to create temporary file".to_string(),
                CoreError::ReadOutput { .. } => "Failed to read generated PDF".to_string(),
                CoreError::Spawn { .. } => "Failed to start compiler".to_string(),
                CoreError::Timeout(limit) => {
                    format!("Compilation timed out after {}s", limit.as_secs())
                }
                CoreError::Toolchain(_) | CoreError::Io(_) => "Internal server error".to_string(),
            },
            Self::Bind { .. } | Self::Io(_) | Self::InvalidAddress(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use texpress_core::{Diagnostic, DiagnosticSource};

    #[test]
    fn test_invalid_json_is_bad_request() {
        let err: ServerError = serde_json::from_str::<serde_json::Value>("not valid json")
            .unwrap_err()
            .into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Invalid JSON format");
    }

    #[test]
    fn test_compiler_diagnostic_passes_through() {
        let diagnostic = Diagnostic::new("! Undefined control sequence.".into(), DiagnosticSource::LogFile);
        let err = ServerError::from(texpress_core::Error::CompilerFailed(diagnostic));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "! Undefined control sequence.");
    }

    #[test]
    fn test_io_failures_use_fixed_phrases() {
        let write = ServerError::from(texpress_core::Error::WriteSource {
            path: "/scratch/a.tex".into(),
            source: std::io::Error::other("disk full"),
        });
        let read = ServerError::from(texpress_core::Error::ReadOutput {
            path: "/scratch/a.pdf".into(),
            source: std::io::Error::other("missing"),
        });
        let timeout = ServerError::from(texpress_core::Error::Timeout(Duration::from_secs(5)));

        assert_eq!(write.client_message(), "Failed to create temporary file");
        assert_eq!(read.client_message(), "Failed to read generated PDF");
        assert_eq!(timeout.client_message(), "Compilation timed out after 5s");
    }

    #[test]
    fn test_bind_error_keeps_address_and_cause() {
        use std::error::Error as _;

        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let err = ServerError::Bind {
            addr,
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };

        assert!(err.to_string().contains("127.0.0.1:8080"));
        let cause = err.source().unwrap().downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(cause.kind(), std::io::ErrorKind::AddrInUse);
        assert_eq!(err.client_message(), "Internal server error");
    }
}
