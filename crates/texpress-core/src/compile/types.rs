//! Common types for the compilation pipeline.

use std::path::PathBuf;
use std::time::Duration;

use super::artifacts::RequestId;
use super::toolchain::DEFAULT_COMPILER;

/// Configuration for the compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Engine executable, either a bare name looked up in `PATH` or a path
    pub program: PathBuf,

    /// Arguments inserted before `-output-directory` and friends
    pub extra_args: Vec<String>,

    /// Directory for per-request temporary files
    pub scratch_dir: PathBuf,

    /// Kill the engine after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_COMPILER),
            extra_args: Vec::new(),
            scratch_dir: std::env::temp_dir(),
            timeout: None,
        }
    }
}

/// A successfully rendered document.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    /// Identifier the compilation ran under
    pub request_id: RequestId,

    /// Raw PDF bytes
    pub pdf: Vec<u8>,

    /// Wall-clock time spent in the engine
    pub duration: Duration,
}
