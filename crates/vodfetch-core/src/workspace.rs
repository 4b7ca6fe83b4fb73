//! Per-job workspace directories.
//!
//! One directory per job, named after the job, exclusively owned by it for
//! its lifetime. Removed on both success and failure exit paths so no stale
//! partial state leaks into a later attempt.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::JobError;

/// Creates a fresh workspace directory for a job, removing any leftover
/// directory from a prior attempt first.
pub fn prepare(root: &Path, dir_name: &str) -> Result<PathBuf, JobError> {
    let dir = root.join(dir_name);
    if dir.exists() {
        tracing::info!("{} already exists, removing stale workspace", dir.display());
        fs::remove_dir_all(&dir).map_err(|e| JobError::storage(&dir, e))?;
    }
    fs::create_dir_all(&dir).map_err(|e| JobError::storage(&dir, e))?;
    tracing::debug!("created workspace {}", dir.display());
    Ok(dir)
}

/// Best-effort recursive removal. Failure is logged, never fatal; the
/// workspace is transient scratch space.
pub fn remove(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        if dir.exists() {
            tracing::warn!("could not remove workspace {}: {}", dir.display(), e);
        }
    }
}
