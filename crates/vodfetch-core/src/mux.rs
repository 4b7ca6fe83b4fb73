//! External muxer invocation.
//!
//! ffmpeg concatenates the fetched units into one playable file by reading
//! the persisted manifest from inside the workspace. Its combined output is
//! written to a log file next to the final file, and its exit status is
//! inspected: a bad mux is a distinct failure, not a fetch problem.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::JobError;

/// Runs the muxer on a completed workspace. Returns the final file path.
///
/// `ffmpeg -i <workdir>/<manifest> -c:v copy <output_dir>/<name>.mp4`, with
/// stdout+stderr captured to `ffmpeg_<name>.log` in `output_dir`. A
/// pre-existing output file is replaced.
pub fn run_muxer(
    ffmpeg_bin: &str,
    workdir: &Path,
    manifest_filename: &str,
    name: &str,
    output_dir: &Path,
) -> Result<PathBuf, JobError> {
    let out_path = output_dir.join(format!("{}.mp4", name));
    if out_path.exists() {
        tracing::info!("{} already exists, removing file", out_path.display());
        fs::remove_file(&out_path).map_err(|e| JobError::storage(&out_path, e))?;
    }

    let input = workdir.join(manifest_filename);
    tracing::info!("packaging {} into {}", input.display(), out_path.display());
    let output = Command::new(ffmpeg_bin)
        .arg("-i")
        .arg(&input)
        .arg("-c:v")
        .arg("copy")
        .arg(&out_path)
        .output()
        .map_err(|e| JobError::MuxerFailure {
            name: name.to_string(),
            detail: format!("spawn {}: {}", ffmpeg_bin, e),
        })?;

    let log_path = output_dir.join(format!("ffmpeg_{}.log", name));
    let mut log = output.stdout.clone();
    log.extend_from_slice(&output.stderr);
    fs::write(&log_path, &log).map_err(|e| JobError::storage(&log_path, e))?;

    if !output.status.success() {
        return Err(JobError::MuxerFailure {
            name: name.to_string(),
            detail: format!("{} (see {})", output.status, log_path.display()),
        });
    }
    Ok(out_path)
}
