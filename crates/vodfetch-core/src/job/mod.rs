//! Job orchestration: one named item end-to-end, and the sequential batch
//! loop with per-job error containment.

use std::fs;
use std::path::Path;

use crate::config::VodfetchConfig;
use crate::error::JobError;
use crate::fetcher::{ManifestSource, SegmentFetcher};
use crate::http::HttpClient;
use crate::locate::{Discovery, ManifestLocator};
use crate::manifest::{self, Manifest};
use crate::mux;
use crate::retry::RetryPolicy;
use crate::url_model;
use crate::workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed,
}

/// Terminal result of one job, reported to the operator.
#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub status: JobStatus,
    pub error: Option<JobError>,
}

/// Locator+parser composite the fetcher re-invokes on stale links.
struct RefreshSource<'a> {
    http: &'a HttpClient,
    config: &'a VodfetchConfig,
    discovery: &'a dyn Discovery,
}

impl ManifestSource for RefreshSource<'_> {
    fn refresh(&self, name: &str) -> Result<Manifest, JobError> {
        let locator = ManifestLocator::new(self.http, self.config, self.discovery);
        let manifest_url = locator.resolve(name)?;
        let (manifest, _document) = manifest::parse(self.http, &manifest_url)?;
        Ok(manifest)
    }
}

/// Shared collaborators for running jobs. One request in flight at a time;
/// each job owns its workspace and cursor exclusively.
pub struct JobRunner<'a> {
    pub http: &'a HttpClient,
    pub config: &'a VodfetchConfig,
    pub discovery: &'a dyn Discovery,
    /// Where final files, muxer logs, and per-job workspaces live.
    pub output_dir: &'a Path,
    /// Keep the workspace after the job finishes (debugging aid).
    pub keep_workdir: bool,
}

impl JobRunner<'_> {
    /// Runs one job end-to-end: workspace, resolve, parse, fetch, mux.
    /// The workspace is removed on every exit path (unless `keep_workdir`).
    pub fn run_job(&self, name: &str) -> Result<(), JobError> {
        tracing::info!("begin downloading {}", name);

        // Filesystem artifacts use a sanitized name; URL building keeps the
        // operator's original spelling.
        let safe_name = url_model::sanitize_segment_filename(name);
        let workdir = workspace::prepare(self.output_dir, &safe_name)?;

        let result = self.run_in_workspace(name, &safe_name, &workdir);

        if self.keep_workdir {
            tracing::info!("keeping workspace {}", workdir.display());
        } else {
            tracing::info!("removing workspace {}", workdir.display());
            workspace::remove(&workdir);
        }
        result
    }

    fn run_in_workspace(
        &self,
        name: &str,
        safe_name: &str,
        workdir: &Path,
    ) -> Result<(), JobError> {
        let locator = ManifestLocator::new(self.http, self.config, self.discovery);
        let manifest_url = locator.resolve(name)?;

        let (manifest, document) = manifest::parse(self.http, &manifest_url)?;
        // The muxer reads the manifest from inside the workspace.
        let doc_path = workdir.join(&manifest.filename);
        fs::write(&doc_path, &document).map_err(|e| JobError::storage(&doc_path, e))?;
        let manifest_filename = manifest.filename.clone();

        let policy = self
            .config
            .retry
            .as_ref()
            .map(RetryPolicy::from_config)
            .unwrap_or_default();
        let source = RefreshSource {
            http: self.http,
            config: self.config,
            discovery: self.discovery,
        };
        let fetcher = SegmentFetcher::new(self.http, &source, policy);
        let cursor = fetcher.run(name, workdir, manifest)?;
        tracing::info!(
            "all {} file(s) downloaded for {}",
            cursor.total_done(),
            name
        );

        mux::run_muxer(
            &self.config.ffmpeg_bin,
            workdir,
            &manifest_filename,
            safe_name,
            self.output_dir,
        )?;
        Ok(())
    }

    /// Processes names strictly sequentially. A failed job is recorded and
    /// the loop continues; only storage-class failures abort the remainder.
    pub fn run_all(&self, names: &[String]) -> Vec<JobOutcome> {
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            match self.run_job(name) {
                Ok(()) => {
                    tracing::info!("{} downloaded", name);
                    outcomes.push(JobOutcome {
                        name: name.clone(),
                        status: JobStatus::Succeeded,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::error!("{} downloading failed: {}", name, e);
                    let abort = e.aborts_batch();
                    outcomes.push(JobOutcome {
                        name: name.clone(),
                        status: JobStatus::Failed,
                        error: Some(e),
                    });
                    if abort {
                        tracing::error!("storage failure, abandoning remaining jobs");
                        break;
                    }
                }
            }
        }
        outcomes
    }
}
