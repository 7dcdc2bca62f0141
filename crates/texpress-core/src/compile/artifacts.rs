//! Per-request identifiers and the temporary files they own.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::paths::ScratchDir;

/// Process-wide sequence that disambiguates identifiers minted in the same nanosecond.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque token that namespaces one request's temporary files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Mint a new identifier from the current time and the process-wide sequence.
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("latex_{nanos}_{seq}"))
    }

    /// The identifier as a file-name stem.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The temporary files belonging to one compilation.
///
/// All paths live in the scratch directory and share the request id as
/// their stem. Dropping the set removes every one of them. Once the engine
/// has been started it also removes any other file the engine left behind
/// under the same stem, which costs one blocking scan of the scratch
/// directory on the dropping thread.
#[derive(Debug)]
pub struct ArtifactSet {
    id: RequestId,
    scratch: ScratchDir,
    engine_started: bool,
    source: PathBuf,
    output: PathBuf,
    log: PathBuf,
    aux: PathBuf,
}

impl ArtifactSet {
    /// Derive the artifact paths for `id` inside `scratch`.
    ///
    /// Nothing is created on disk; cleanup is armed from this point on.
    pub fn new(scratch: &ScratchDir, id: RequestId) -> Self {
        let stem = id.as_str();
        Self {
            source: scratch.join(&format!("{stem}.tex")),
            output: scratch.join(&format!("{stem}.pdf")),
            log: scratch.join(&format!("{stem}.log")),
            aux: scratch.join(&format!("{stem}.aux")),
            scratch: scratch.clone(),
            engine_started: false,
            id,
        }
    }

    /// Record that the engine was launched for this set.
    ///
    /// Only then can files other than the four named ones exist, so the
    /// directory sweep on drop is skipped until this is called.
    pub fn mark_engine_started(&mut self) {
        self.engine_started = true;
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// Source file handed to the engine.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where the engine writes the rendered PDF.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Where the engine writes its diagnostic log.
    pub fn log(&self) -> &Path {
        &self.log
    }

    pub fn aux(&self) -> &Path {
        &self.aux
    }

    /// Remove every file owned by this set. Missing files are ignored.
    fn remove_all(&self) {
        let known = [&self.source, &self.output, &self.log, &self.aux];
        for path in known {
            remove_quietly(path);
        }

        if !self.engine_started {
            return;
        }

        // Engines emit extra files (.out, .toc, .nav, ...) depending on the document.
        let prefix = format!("{}.", self.id.as_str());
        for path in self.scratch.entries_with_prefix(&prefix) {
            remove_quietly(&path);
        }
    }
}

impl Drop for ArtifactSet {
    fn drop(&mut self) {
        self.remove_all();
        tracing::debug!(request_id = %self.id, "Removed temporary files");
    }
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
