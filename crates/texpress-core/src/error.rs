//! Error types for texpress-core.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::compile::Diagnostic;

/// Result type for texpress-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a document.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing the source text into the scratch directory failed.
    #[error("failed to write source file {path}: {source}")]
    WriteSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler process could not be started.
    #[error("failed to start compiler {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler exited with a non-zero status.
    #[error("compilation failed ({})", .0.kind)]
    CompilerFailed(Diagnostic),

    /// The compiler did not finish within the configured limit.
    #[error("compilation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The compiler reported success but its output could not be read.
    #[error("failed to read generated PDF {path}: {source}")]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiler program could not be located.
    #[error("toolchain error: {0}")]
    Toolchain(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A short recovery hint suitable for terminal output.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Spawn { .. } | Error::Toolchain(_) => {
                Some("install a TeX distribution or pass --compiler with the engine path")
            }
            Error::CompilerFailed(diagnostic) => Some(diagnostic.kind.hint()),
            Error::Timeout(_) => Some("simplify the document or raise --timeout-secs"),
            Error::WriteSource { .. } => Some("check that the scratch directory is writable"),
            Error::ReadOutput { .. } | Error::Io(_) => None,
        }
    }

    /// Format the error together with its hint, if any.
    pub fn with_hint(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{self}\n  hint: {hint}"),
            None => self.to_string(),
        }
    }
}
