//! Fetcher serving canned pages.

use std::collections::HashMap;

use projconf_core::{
    application::{ApplicationError, ports::PageFetcher},
    error::ProjconfResult,
};

/// Serves pages from a URL → HTML map. Unknown URLs fail like a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style page registration.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> ProjconfResult<String> {
        self.pages.get(url).cloned().ok_or_else(|| {
            ApplicationError::FetchFailed {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".into(),
            }
            .into()
        })
    }
}
