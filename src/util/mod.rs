//! Atomic file output.
//!
//! Reports and config files are written to a temporary file next to the
//! target and renamed into place, so a crash or a failed export never leaves
//! a half-written file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::{Result, ViewerError};

/// Directory the temporary file for `path` is created in.
///
/// A bare file name has an empty parent, which means the current directory.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create a temporary file on the same filesystem as `path`, creating
/// missing parent directories first.
fn temp_beside(path: &Path) -> Result<NamedTempFile> {
    let parent = parent_dir(path);
    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ViewerError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }
    NamedTempFile::new_in(parent).map_err(|e| {
        ViewerError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })
}

fn persist(mut temp_file: NamedTempFile, path: &Path) -> Result<()> {
    temp_file
        .flush()
        .map_err(|e| ViewerError::io(format!("Failed to flush file: {}", path.display()), e))?;
    temp_file.persist(path).map_err(|e| {
        ViewerError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;
    trace!(path = %path.display(), "Atomic write complete");
    Ok(())
}

/// Atomically write `content` to `path`.
///
/// If any step fails, an existing file at `path` is left unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use trajview::util::atomic_write;
///
/// atomic_write("config.toml", b"[store]\nroot = \"./data/trajs\"\n").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut temp_file = temp_beside(path)?;
    temp_file.write_all(content).map_err(|e| {
        ViewerError::io(format!("Failed to write temporary file for: {}", path.display()), e)
    })?;
    persist(temp_file, path)
}

/// A file that replaces its target only when [`finish`](Self::finish) is
/// called. Dropping it unfinished discards the temporary file.
///
/// ```rust,no_run
/// use std::io::Write;
/// use trajview::util::AtomicFile;
///
/// let mut atomic = AtomicFile::create("report.md").unwrap();
/// writeln!(atomic.writer(), "# traj1").unwrap();
/// atomic.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct AtomicFile {
    temp_file: NamedTempFile,
    target_path: PathBuf,
}

impl AtomicFile {
    /// Start an atomic write to `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            temp_file: temp_beside(path)?,
            target_path: path.to_path_buf(),
        })
    }

    /// Writer for the pending content.
    pub fn writer(&mut self) -> &mut NamedTempFile {
        &mut self.temp_file
    }

    /// Target path.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target_path
    }

    /// Sync and rename the temporary file onto the target.
    pub fn finish(self) -> Result<()> {
        persist(self.temp_file, &self.target_path)
    }
}
