//! Core engine for the texpress LaTeX rendering service.
//!
//! This crate provides:
//! - Scratch directory management
//! - The compile pipeline shared by the HTTP server and the CLI
//! - Diagnostics extracted from failed engine runs

pub mod compile;
pub mod error;
pub mod paths;

pub use compile::{
    CompiledDocument, CompilerConfig, Diagnostic, DiagnosticKind, DiagnosticSource, LatexCompiler,
    LogError, RequestId, Toolchain,
};
pub use error::{Error, Result};
pub use paths::ScratchDir;
