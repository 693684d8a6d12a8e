//! File system access used by the generation pipeline.
//!
//! Every operation goes through the [`FileSystem`] trait so the pipeline can
//! run against the real disk ([`LocalFileSystem`]) or a test double that
//! records what was touched and in which order.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// File operations performed by the generator
///
/// Removal operations treat a missing path as already removed.
pub trait FileSystem {
    /// Create `path` and all missing parents. No error if it already exists.
    fn create_dir_all(&self, path: &Path) -> anyhow::Result<()>;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> anyhow::Result<String>;
    /// Create or truncate `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()>;
    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()>;
    /// Remove a file, or a directory and everything under it.
    fn remove(&self, path: &Path) -> anyhow::Result<()>;
    /// Direct children of a directory, sorted by path.
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>>;
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

/// Log a failed operation with its path, then hand the error back.
fn logged<T>(op: &'static str, path: &Path, result: anyhow::Result<T>) -> anyhow::Result<T> {
    if let Err(e) = &result {
        error!(operation = op, path = %path.display(), error = %format!("{e:#}"), "File system operation failed");
    }
    result
}

impl FileSystem for LocalFileSystem {
    fn create_dir_all(&self, path: &Path) -> anyhow::Result<()> {
        let result = fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()));
        logged("create_dir_all", path, result)?;
        debug!(path = %path.display(), "Ensured directory");
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        let result =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()));
        logged("read", path, result)
    }

    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        let result =
            fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()));
        logged("write", path, result)?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        let result = fs::rename(from, to).with_context(|| {
            format!("Failed to move {} to {}", from.display(), to.display())
        });
        logged("rename", from, result)?;
        debug!(from = %from.display(), to = %to.display(), "Moved");
        Ok(())
    }

    fn remove(&self, path: &Path) -> anyhow::Result<()> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Nothing to remove");
                return Ok(());
            }
            Err(e) => {
                let result: anyhow::Result<()> =
                    Err(e).with_context(|| format!("Failed to inspect {}", path.display()));
                return logged("remove", path, result);
            }
        };
        let result = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
        .with_context(|| format!("Failed to remove {}", path.display()));
        logged("remove", path, result)?;
        debug!(path = %path.display(), "Removed");
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let result = fs::read_dir(path)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<std::io::Result<Vec<_>>>()
            })
            .with_context(|| format!("Failed to list {}", path.display()));
        let mut paths = logged("list_dir", path, result)?;
        paths.sort();
        Ok(paths)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
