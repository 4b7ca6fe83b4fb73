//! Search-surface discovery behind a narrow interface.
//!
//! Discovery is a brittle pattern-match over a search page; it lives behind
//! the `Discovery` trait so the locator and fetcher never depend on its
//! internals and it can be swapped for a structured API later.

use regex::Regex;

use crate::error::JobError;
use crate::http::HttpClient;

/// Finds a page URL for a name when the canonical guess misses.
pub trait Discovery {
    /// Returns the first candidate page URL, or `None` when the search
    /// surface has nothing for this name.
    fn discover(&self, name: &str) -> Result<Option<String>, JobError>;
}

/// Scans the configured search page for a link containing the lowercased
/// name. Takes the first match; there is no ranking or disambiguation, and
/// that is a documented policy choice, not an oversight.
pub struct SearchPageDiscovery {
    http: HttpClient,
    search_url: String,
}

impl SearchPageDiscovery {
    pub fn new(http: HttpClient, search_url: String) -> Self {
        Self { http, search_url }
    }
}

/// First link in `body` that contains the lowercased name, ending in `/`.
fn scan_search_body(body: &str, name: &str) -> Option<String> {
    let needle = regex::escape(&name.to_lowercase());
    let pattern = format!(r"https?://[^\s\x22'<>]*{}[0-9A-Za-z_!@#$%^&*()+=-]*/", needle);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("search pattern for {:?} did not compile: {}", name, e);
            return None;
        }
    };
    re.find(body).map(|m| m.as_str().to_string())
}

impl Discovery for SearchPageDiscovery {
    fn discover(&self, name: &str) -> Result<Option<String>, JobError> {
        let resp = self
            .http
            .get(&self.search_url)
            .map_err(|e| JobError::transport(&self.search_url, e))?;
        if !resp.is_ok() {
            return Err(JobError::FetchError {
                url: self.search_url.clone(),
                status: resp.status,
            });
        }

        let found = scan_search_body(&resp.text(), name);
        match &found {
            Some(url) => tracing::debug!("search result for {:?}: {}", name, url),
            None => tracing::error!(
                "couldn't find anything related to {:?} on {}",
                name,
                self.search_url
            ),
        }
        Ok(found)
    }
}
