//! Job-level error taxonomy.
//!
//! Every way a job can end unsuccessfully is one variant here, so the batch
//! loop can contain failures per job and report them uniformly. `Storage`
//! is the one resource-exhaustion-class variant that also stops the batch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    /// Neither the canonical page guess nor search discovery produced a
    /// manifest link for this name. A normal outcome, not an exceptional one.
    #[error("no manifest found for {name:?}")]
    NotFound { name: String },

    /// Non-success HTTP status on a page or on the manifest document itself.
    #[error("GET {url} returned HTTP {status}")]
    FetchError { url: String, status: u32 },

    /// Manifest parsed but unusable: zero segments, a master playlist where a
    /// media playlist was expected, or a key tag with an empty URI.
    #[error("manifest at {url} is empty or malformed")]
    EmptyManifest { url: String },

    /// A URL received from a page or manifest could not be parsed.
    #[error("invalid URL {url}: {detail}")]
    InvalidUrl { url: String, detail: String },

    /// Stale-link recovery ran out of attempts for a single unit.
    #[error("gave up fetching {filename} after {attempts} attempt(s)")]
    ExhaustedRetries { filename: String, attempts: u32 },

    /// The external muxer could not be spawned or exited unsuccessfully.
    /// Kept distinct from fetch failures; the downloaded units were fine.
    #[error("muxer failed for {name}: {detail}")]
    MuxerFailure { name: String, detail: String },

    /// Transport-level failure (DNS, connect, timeout) below the status-code
    /// classification. Fatal for the job.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Local filesystem failure (disk full, permissions). Aborts the batch.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl JobError {
    /// True for failures that should stop the whole run, not just this job.
    pub fn aborts_batch(&self) -> bool {
        matches!(self, JobError::Storage { .. })
    }

    pub(crate) fn storage(path: &std::path::Path, source: std::io::Error) -> Self {
        JobError::Storage {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn transport(url: &str, source: curl::Error) -> Self {
        JobError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
