//! Compiler discovery.
//!
//! Resolves the LaTeX engine executable the pipeline invokes.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Engine used when none is configured.
pub const DEFAULT_COMPILER: &str = "pdflatex";

/// A resolved compiler executable plus any extra leading arguments.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Path to the engine (or wrapper) executable
    program: PathBuf,

    /// Arguments placed before the fixed engine arguments
    extra_args: Vec<String>,
}

impl Toolchain {
    /// Resolve `program` to an executable.
    ///
    /// Names without a path separator are looked up in `PATH`; anything
    /// else must point at an existing file.
    pub fn resolve(program: impl AsRef<Path>, extra_args: Vec<String>) -> Result<Self> {
        let program = program.as_ref();

        let resolved = if program.components().count() > 1 {
            if !program.exists() {
                return Err(Error::Toolchain(format!(
                    "compiler not found: {}",
                    program.display()
                )));
            }
            program.to_path_buf()
        } else {
            which::which(program).map_err(|_| {
                Error::Toolchain(format!("{} not found in PATH", program.display()))
            })?
        };

        Ok(Self {
            program: resolved,
            extra_args,
        })
    }

    /// Resolve the default engine from `PATH`.
    pub fn detect() -> Result<Self> {
        Self::resolve(DEFAULT_COMPILER, Vec::new())
    }

    /// Get the program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Get the extra leading arguments.
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// First line of `<program> [extra args] --version`.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.extra_args)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::Toolchain(format!(
                "{} --version exited with {}",
                self.program.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_rejected() {
        let err = Toolchain::resolve("/definitely/not/here/pdflatex", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Toolchain(_)));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = Toolchain::resolve("texpress-no-such-engine", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_from_path_and_version() {
        let toolchain = Toolchain::resolve("sh", vec!["-c".into(), "echo 'engine 1.0'; echo more".into()])
            .expect("sh should be on PATH");

        assert!(toolchain.program().is_absolute());
        assert_eq!(toolchain.extra_args().len(), 2);
        assert_eq!(toolchain.version().unwrap(), "engine 1.0");
    }
}
