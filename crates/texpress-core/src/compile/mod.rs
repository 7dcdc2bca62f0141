//! Compilation pipeline for texpress.
//!
//! This module provides:
//! - Request identifiers and the temporary files they own
//! - Compiler discovery (`pdflatex` or a configured engine)
//! - The compile pipeline (source → scratch file → engine → PDF)
//! - Diagnostics (log/output precedence, TeX log parsing, classification)
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │
//!     ├── ArtifactSet (latex_<nanos>_<seq>.{tex,pdf,log,aux}, removed on drop)
//!     │
//!     └── LatexCompiler ──► engine -output-directory=<scratch> -interaction=nonstopmode <tex>
//!                                   │
//!                                   ├── exit 0  ──► read .pdf ──► CompiledDocument
//!                                   └── exit ≠0 ──► .log or stdout+stderr ──► Diagnostic
//! ```

mod artifacts;
mod compiler;
mod diagnostics;
mod toolchain;
mod types;

pub use artifacts::{ArtifactSet, RequestId};
pub use compiler::LatexCompiler;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSource, LogError, parse_log_errors};
pub use toolchain::{DEFAULT_COMPILER, Toolchain};
pub use types::{CompiledDocument, CompilerConfig};
