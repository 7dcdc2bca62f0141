//! Request and response bodies for the compile endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /compile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    /// LaTeX source, passed to the engine verbatim.
    pub latex_code: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse::new("Invalid JSON format")).unwrap();
        assert_eq!(json, r#"{"error":"Invalid JSON format"}"#);
    }

    #[test]
    fn test_request_requires_latex_code() {
        assert!(serde_json::from_str::<CompileRequest>("{}").is_err());
        assert!(serde_json::from_str::<CompileRequest>(r#"{"latex_code": 3}"#).is_err());

        let req: CompileRequest =
            serde_json::from_str(r#"{"latex_code": "\\relax", "extra": true}"#).unwrap();
        assert_eq!(req.latex_code, "\\relax");
    }
}
