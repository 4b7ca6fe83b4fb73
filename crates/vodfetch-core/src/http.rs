//! Blocking HTTP GET transport over libcurl.
//!
//! GET is the only verb the system uses, and exactly one request is in
//! flight at a time. Responses are classified by status code only; any
//! status comes back to the caller, transport-level problems are curl
//! errors.

use std::time::Duration;

/// A buffered GET response: status code plus the whole body.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Body decoded lossily as UTF-8 (page scraping tolerates mojibake).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Blocking GET client carrying the fixed User-Agent header.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }

    /// Performs a GET and buffers the full body.
    ///
    /// Follows redirects. Aborts if throughput drops below 1 KiB/s for 60s;
    /// hard cap of 10 minutes so a stuck transfer eventually fails.
    pub fn get(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(Duration::from_secs(600))?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
