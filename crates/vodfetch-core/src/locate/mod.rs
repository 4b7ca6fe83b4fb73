//! Manifest location: canonical page guess with search-discovery fallback.
//!
//! The locator fetches the page that embeds the media playlist link, not the
//! playlist itself. A 404 on the canonical guess triggers the discovery
//! fallback; any other non-success status on the page is a fetch error.

mod discover;

pub use discover::{Discovery, SearchPageDiscovery};

use std::sync::LazyLock;

use regex::Regex;

use crate::config::VodfetchConfig;
use crate::error::JobError;
use crate::http::HttpClient;

static M3U8_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+\.m3u8"#).expect("m3u8 link pattern")
});

/// Scans a page body for the first embedded playlist link.
fn first_m3u8_link(body: &str) -> Option<&str> {
    M3U8_LINK.find(body).map(|m| m.as_str())
}

pub struct ManifestLocator<'a> {
    http: &'a HttpClient,
    config: &'a VodfetchConfig,
    discovery: &'a dyn Discovery,
}

impl<'a> ManifestLocator<'a> {
    pub fn new(
        http: &'a HttpClient,
        config: &'a VodfetchConfig,
        discovery: &'a dyn Discovery,
    ) -> Self {
        Self {
            http,
            config,
            discovery,
        }
    }

    /// Resolves a job name to its manifest URL.
    ///
    /// Tries the canonical page URL built from the name; on 404 falls back to
    /// `Discovery`. `NotFound` is the normal outcome when neither path yields
    /// a playlist link.
    pub fn resolve(&self, name: &str) -> Result<String, JobError> {
        let canonical = self.config.page_url(name);
        let mut page_url = canonical;
        let mut resp = self
            .http
            .get(&page_url)
            .map_err(|e| JobError::transport(&page_url, e))?;

        if resp.is_not_found() {
            tracing::warn!("GET {} returned 404, attempting a search", page_url);
            match self.discovery.discover(name)? {
                Some(found) => {
                    page_url = found;
                    resp = self
                        .http
                        .get(&page_url)
                        .map_err(|e| JobError::transport(&page_url, e))?;
                }
                None => {
                    return Err(JobError::NotFound {
                        name: name.to_string(),
                    });
                }
            }
        }

        if !resp.is_ok() {
            return Err(JobError::FetchError {
                url: page_url,
                status: resp.status,
            });
        }

        let body = resp.text();
        match first_m3u8_link(&body) {
            Some(link) => {
                tracing::debug!("resolved {} to manifest {}", name, link);
                Ok(link.to_string())
            }
            None => {
                tracing::error!("no playlist link found at {}", page_url);
                Err(JobError::NotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}
