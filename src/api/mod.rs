use async_trait::async_trait;

use crate::data_models::{SearchRequest, SearchResponse};
use crate::error::Result;

pub mod client;

pub use client::HttpSearchClient;

/// Path of the scrape endpoint, relative to the API base URL.
pub const SCRAPE_PATH: &str = "scrape";

/// Where search requests go. A non-2xx answer must surface as
/// [`crate::error::Error::Rejected`] so callers can show the server's message.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}
