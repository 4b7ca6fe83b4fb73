//! Manifest model: the ordered unit-of-work list parsed from a media
//! playlist, plus the base URL the unit filenames are relative to.

mod parse;

pub use parse::parse;

/// What kind of unit a fetch is for. The key never advances the segment
/// index; segments advance it in manifest order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Key,
    Segment,
}

/// One fetchable unit selected by the cursor. Borrows its filename from the
/// manifest it was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    pub kind: UnitKind,
    pub filename: &'a str,
}

/// A parsed manifest. Immutable once built; re-resolution on a stale link
/// produces a whole new `Manifest` (base URL recomputed, never merged).
#[derive(Debug, Clone)]
pub struct Manifest {
    /// URL the manifest document was fetched from.
    pub source_url: String,
    /// `source_url` with its final path segment stripped; the prefix every
    /// key/segment fetch uses.
    pub base_url: String,
    /// Local filename for the manifest document inside the workspace.
    pub filename: String,
    /// Decryption key URI; at most one, fetched before any segment.
    pub key: Option<String>,
    /// Segment URIs in playback order. This is also the assembly order.
    pub segments: Vec<String>,
}

impl Manifest {
    /// Total units a complete job must fetch.
    pub fn unit_count(&self) -> usize {
        self.segments.len() + usize::from(self.key.is_some())
    }
}
