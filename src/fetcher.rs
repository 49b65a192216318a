use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::errors::ScrapeError;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Blocking HTTP client for archive pages. Redirects are followed; every
/// request is bounded by a 30s timeout so a slow response cannot starve the
/// worker pool.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        PageFetcher { client }
    }

    /// Fetches one page, returning the body and the final URL after any
    /// redirects. Network failures, timeouts, and non-success statuses all
    /// surface as a fetch error.
    pub fn fetch(&self, url: &str) -> Result<(String, String), ScrapeError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let resolved_url = response.url().to_string();
        let body = response.text()?;
        Ok((body, resolved_url))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        PageFetcher::new()
    }
}
