//! The fetch loop: one unit at a time, stale-link recovery in between.

use std::fs;
use std::path::Path;

use super::{FetchCursor, ManifestSource};
use crate::error::JobError;
use crate::http::HttpClient;
use crate::manifest::Manifest;
use crate::retry::{RetryDecision, RetryPolicy};
use crate::url_model;

pub struct SegmentFetcher<'a> {
    http: &'a HttpClient,
    source: &'a dyn ManifestSource,
    policy: RetryPolicy,
}

impl<'a> SegmentFetcher<'a> {
    pub fn new(http: &'a HttpClient, source: &'a dyn ManifestSource, policy: RetryPolicy) -> Self {
        Self {
            http,
            source,
            policy,
        }
    }

    /// Fetches every unit of `manifest` into `workdir`, in order.
    ///
    /// On a non-200 for any unit the current manifest is considered stale: a
    /// fresh one is obtained through the `ManifestSource` and the same
    /// filename is retried against the new base URL. The cursor is never
    /// rewound; already-persisted units do not belong to any one manifest
    /// instance. Re-resolution failures and retry exhaustion are fatal.
    pub fn run(
        &self,
        name: &str,
        workdir: &Path,
        manifest: Manifest,
    ) -> Result<FetchCursor, JobError> {
        let mut manifest = manifest;
        let mut cursor = FetchCursor::new(&manifest);

        while let Some(unit) = cursor.select(&manifest) {
            let kind = unit.kind;
            let filename = unit.filename.to_string();
            self.fetch_unit(name, workdir, &mut manifest, &filename)?;
            cursor.advance(kind);
            tracing::debug!(
                "{}: {}/{} unit(s) done",
                name,
                cursor.total_done(),
                cursor.total_expected()
            );
        }

        debug_assert!(cursor.is_complete());
        Ok(cursor)
    }

    /// Fetches a single unit, re-resolving the manifest on stale links until
    /// it succeeds or the retry policy gives up. On success the body is
    /// persisted under the unit's (sanitized) filename in the workspace.
    fn fetch_unit(
        &self,
        name: &str,
        workdir: &Path,
        manifest: &mut Manifest,
        filename: &str,
    ) -> Result<(), JobError> {
        let mut attempt = 1u32;
        loop {
            let url = format!("{}{}", manifest.base_url, filename);
            let resp = self
                .http
                .get(&url)
                .map_err(|e| JobError::transport(&url, e))?;

            if resp.is_ok() {
                tracing::info!("{}: 200 OK", filename);
                let path = workdir.join(url_model::sanitize_segment_filename(filename));
                fs::write(&path, &resp.body).map_err(|e| JobError::storage(&path, e))?;
                return Ok(());
            }

            tracing::error!(
                "download of {} failed with HTTP {}, link considered stale",
                filename,
                resp.status
            );
            match self.policy.decide(attempt) {
                RetryDecision::NoRetry => {
                    return Err(JobError::ExhaustedRetries {
                        filename: filename.to_string(),
                        attempts: attempt,
                    });
                }
                RetryDecision::RetryAfter(delay) => {
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    // Fresh manifest, fresh base URL; cursor state is not
                    // touched. Failure here ends the job.
                    *manifest = self.source.refresh(name)?;
                    attempt += 1;
                }
            }
        }
    }
}
