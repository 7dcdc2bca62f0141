//! The compile pipeline: source text in, PDF bytes or a diagnostic out.

use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::paths::ScratchDir;

use super::artifacts::{ArtifactSet, RequestId};
use super::diagnostics::Diagnostic;
use super::toolchain::Toolchain;
use super::types::{CompiledDocument, CompilerConfig};

/// Runs LaTeX sources through an external engine.
///
/// Each call to [`compile`](Self::compile) works on its own set of scratch
/// files, so one compiler can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    toolchain: Toolchain,
    scratch: ScratchDir,
    timeout: Option<Duration>,
}

impl LatexCompiler {
    /// Resolve the engine and prepare the scratch directory.
    pub fn new(config: &CompilerConfig) -> Result<Self> {
        let toolchain = Toolchain::resolve(&config.program, config.extra_args.clone())?;
        let scratch = ScratchDir::new(&config.scratch_dir)?;
        Ok(Self::with_parts(toolchain, scratch, config.timeout))
    }

    /// Create from already resolved parts.
    pub fn with_parts(toolchain: Toolchain, scratch: ScratchDir, timeout: Option<Duration>) -> Self {
        Self {
            toolchain,
            scratch,
            timeout,
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Compile `source` to PDF.
    ///
    /// All temporary files are removed before this returns, whichever way
    /// it returns.
    pub async fn compile(&self, source: &str) -> Result<CompiledDocument> {
        let mut artifacts = ArtifactSet::new(&self.scratch, RequestId::generate());
        let request_id = artifacts.id().clone();

        tokio::fs::write(artifacts.source(), source)
            .await
            .map_err(|e| Error::WriteSource {
                path: artifacts.source().to_path_buf(),
                source: e,
            })?;

        let started = Instant::now();
        let output = self.run_engine(&mut artifacts).await?;
        let duration = started.elapsed();

        if !output.status.success() {
            let log = tokio::fs::read(artifacts.log()).await.ok();
            let combined = combined_output(&output);
            let diagnostic = Diagnostic::collect(log.as_deref(), &combined, output.status);
            tracing::debug!(
                request_id = %request_id,
                status = %output.status,
                source = ?diagnostic.source,
                "Compiler reported failure"
            );
            return Err(Error::CompilerFailed(diagnostic));
        }

        let pdf = tokio::fs::read(artifacts.output())
            .await
            .map_err(|e| Error::ReadOutput {
                path: artifacts.output().to_path_buf(),
                source: e,
            })?;

        Ok(CompiledDocument {
            request_id,
            pdf,
            duration,
        })
    }

    /// Build the engine command for one artifact set.
    fn command(&self, artifacts: &ArtifactSet) -> Command {
        let mut cmd = Command::new(self.toolchain.program());
        cmd.args(self.toolchain.extra_args())
            .arg(format!("-output-directory={}", self.scratch.path().display()))
            .arg("-interaction=nonstopmode")
            .arg(artifacts.source())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Spawn the engine and wait for it, honouring the timeout if one is set.
    async fn run_engine(&self, artifacts: &mut ArtifactSet) -> Result<Output> {
        let mut cmd = self.command(artifacts);
        tracing::debug!(request_id = %artifacts.id(), "Running {:?}", cmd.as_std());

        let child = cmd.spawn().map_err(|e| Error::Spawn {
            program: self.toolchain.program().to_path_buf(),
            source: e,
        })?;
        artifacts.mark_engine_started();

        // Dropping the wait future on timeout drops the child, which kills it.
        let waiting = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, waiting)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => waiting.await,
        };

        Ok(output?)
    }
}

/// Stdout followed by stderr, lossily decoded.
fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}
