//! Blocking HTTP fetcher.

use std::time::Duration;

use tracing::debug;

use projconf_core::{
    application::{ApplicationError, ports::PageFetcher},
    error::{Context, ProjconfResult},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads pages with a blocking `reqwest` client.
///
/// No retries: a failed download aborts the generation run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> ProjconfResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> ProjconfResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("projconf/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ProjconfResult<String> {
        debug!(url, "Fetching page");
        let failed = |reason: String| ApplicationError::FetchFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {status}")).into());
        }

        let body = response.text().map_err(|e| failed(e.to_string()))?;
        debug!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
