//! Scratch directory management.
//!
//! Every compilation stages its files in one shared scratch directory.
//! Requests never share file names because each one is namespaced by a
//! [`RequestId`](crate::compile::RequestId):
//!
//! ```text
//! <scratch>/
//! ├── latex_1718000000000000000_0.tex   # source written from the request
//! ├── latex_1718000000000000000_0.pdf   # rendered output
//! ├── latex_1718000000000000000_0.log   # engine diagnostic log
//! └── latex_1718000000000000000_0.aux   # engine auxiliary file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Shared directory used to stage per-request temporary files.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Use `root` as the scratch directory, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if directory creation fails.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of a file named `name` inside the scratch directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all entries whose file name starts with `prefix`.
    ///
    /// Unreadable entries are skipped.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
            .map(|entry| entry.path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_directory() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("nested").join("scratch");

        let scratch = ScratchDir::new(&root).expect("Failed to create scratch dir");

        assert!(root.is_dir());
        assert_eq!(scratch.path(), root.as_path());
        assert_eq!(scratch.join("a.tex"), root.join("a.tex"));
    }

    #[test]
    fn test_entries_with_prefix() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let scratch = ScratchDir::new(temp.path()).expect("Failed to create scratch dir");

        fs::write(scratch.join("latex_1_0.tex"), "a").unwrap();
        fs::write(scratch.join("latex_1_0.out"), "b").unwrap();
        fs::write(scratch.join("latex_1_1.tex"), "c").unwrap();

        let mut found = scratch.entries_with_prefix("latex_1_0.");
        found.sort();

        assert_eq!(
            found,
            vec![scratch.join("latex_1_0.out"), scratch.join("latex_1_0.tex")]
        );
    }
}
