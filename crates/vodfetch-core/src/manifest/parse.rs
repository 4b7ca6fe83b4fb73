//! Download and decode a media playlist into a `Manifest`.

use m3u8_rs::Playlist;

use super::Manifest;
use crate::error::JobError;
use crate::http::HttpClient;
use crate::url_model;

/// Fetches and parses the manifest document.
///
/// Returns the parsed `Manifest` together with the raw document bytes so the
/// caller can persist them into the workspace for the muxer. Any non-success
/// status on the manifest itself is a `FetchError`; a document with zero
/// segments or an empty key reference is `EmptyManifest`.
pub fn parse(http: &HttpClient, manifest_url: &str) -> Result<(Manifest, Vec<u8>), JobError> {
    let resp = http
        .get(manifest_url)
        .map_err(|e| JobError::transport(manifest_url, e))?;
    if !resp.is_ok() {
        return Err(JobError::FetchError {
            url: manifest_url.to_string(),
            status: resp.status,
        });
    }

    let manifest = decode(manifest_url, &resp.body)?;
    tracing::debug!(
        "parsed manifest {}: {} segment(s), key: {}",
        manifest.filename,
        manifest.segments.len(),
        manifest.key.is_some()
    );
    Ok((manifest, resp.body))
}

/// Decodes playlist bytes fetched from `manifest_url`.
fn decode(manifest_url: &str, body: &[u8]) -> Result<Manifest, JobError> {
    let playlist = match m3u8_rs::parse_playlist_res(body) {
        Ok(Playlist::MediaPlaylist(pl)) => pl,
        // A master playlist has no segments to fetch; same failure mode as
        // an undecodable document.
        Ok(Playlist::MasterPlaylist(_)) | Err(_) => {
            return Err(JobError::EmptyManifest {
                url: manifest_url.to_string(),
            });
        }
    };

    // The single key unit is the first EXT-X-KEY with a URI. A key tag whose
    // URI is missing or empty is reported, not silently tolerated.
    let mut key: Option<String> = None;
    for segment in &playlist.segments {
        if let Some(k) = &segment.key {
            let uri = k.uri.clone().unwrap_or_default();
            if uri.is_empty() {
                return Err(JobError::EmptyManifest {
                    url: manifest_url.to_string(),
                });
            }
            key = Some(uri);
            break;
        }
    }

    let segments: Vec<String> = playlist.segments.iter().map(|s| s.uri.clone()).collect();
    if segments.is_empty() {
        return Err(JobError::EmptyManifest {
            url: manifest_url.to_string(),
        });
    }

    let base_url = url_model::base_url(manifest_url).map_err(|e| JobError::InvalidUrl {
        url: manifest_url.to_string(),
        detail: e.to_string(),
    })?;
    let filename = url_model::filename_from_url(manifest_url)
        .map(|f| url_model::sanitize_segment_filename(&f))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "index.m3u8".to_string());

    Ok(Manifest {
        source_url: manifest_url.to_string(),
        base_url,
        filename,
        key,
        segments,
    })
}
