//! Page fetcher adapters.

mod http;
mod fixed;

pub use fixed::StaticFetcher;
pub use http::HttpFetcher;
