//! The retrying segment fetch state machine.
//!
//! Walks the manifest's ordered unit list, persists each unit's bytes into
//! the job workspace, and recovers from stale links by re-resolving a fresh
//! manifest without losing its place.

mod run;

pub use run::SegmentFetcher;

use crate::error::JobError;
use crate::manifest::{Manifest, Unit, UnitKind};

/// Re-resolves a fresh manifest when segment links go stale. Implemented by
/// the locator+parser composite; the fetcher never sees discovery internals.
pub trait ManifestSource {
    fn refresh(&self, name: &str) -> Result<Manifest, JobError>;
}

/// Per-job fetch progress.
///
/// Counts units already durably written to the workspace. Downloaded bytes
/// do not belong to any one manifest instance, so the cursor survives
/// manifest re-resolution untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchCursor {
    key_fetched: bool,
    segment_index: usize,
    total_done: usize,
    total_expected: usize,
}

impl FetchCursor {
    pub fn new(manifest: &Manifest) -> Self {
        Self {
            key_fetched: false,
            segment_index: 0,
            total_done: 0,
            total_expected: manifest.unit_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_done == self.total_expected
    }

    pub fn total_done(&self) -> usize {
        self.total_done
    }

    pub fn total_expected(&self) -> usize {
        self.total_expected
    }

    /// Selects the next unit to fetch, or `None` when the job is complete.
    ///
    /// Completion is checked before indexing: at completion `segment_index`
    /// equals the segment count, a valid non-dereferenceable value.
    pub fn select<'m>(&self, manifest: &'m Manifest) -> Option<Unit<'m>> {
        if self.is_complete() {
            return None;
        }
        if let Some(key) = &manifest.key {
            if !self.key_fetched {
                return Some(Unit {
                    kind: UnitKind::Key,
                    filename: key,
                });
            }
        }
        manifest.segments.get(self.segment_index).map(|s| Unit {
            kind: UnitKind::Segment,
            filename: s,
        })
    }

    /// Records one durably persisted unit. The key never advances the
    /// segment index.
    pub fn advance(&mut self, kind: UnitKind) {
        match kind {
            UnitKind::Key => self.key_fetched = true,
            UnitKind::Segment => self.segment_index += 1,
        }
        self.total_done += 1;
        debug_assert_eq!(
            self.total_done,
            usize::from(self.key_fetched) + self.segment_index
        );
    }
}
