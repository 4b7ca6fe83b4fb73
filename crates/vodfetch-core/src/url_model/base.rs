//! Base-URL derivation for segment fetches.

use url::{Position, Url};

/// Strips the final path segment from a URL, returning a prefix that always
/// ends in `/`. Query and fragment are dropped; segment filenames are
/// appended directly to this prefix.
///
/// `https://cdn.example.com/v/abc/index.m3u8` → `https://cdn.example.com/v/abc/`
pub fn base_url(raw: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw)?;
    let authority = &parsed[..Position::BeforePath];

    let mut segments: Vec<&str> = parsed.path().split('/').collect();
    // Drop the final segment (the manifest filename, or "" for a trailing slash).
    segments.pop();
    let prefix = segments.join("/");

    Ok(format!("{}{}/", authority, prefix))
}
