use async_trait::async_trait;
use reqwest::Url;

use crate::data_models::{FailureBody, SearchRequest, SearchResponse};
use crate::error::{Error, Result};

use super::{SCRAPE_PATH, SearchBackend};

pub struct HttpSearchClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchClient {
    pub fn new(api_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(http: reqwest::Client, api_url: &str) -> Result<Self> {
        let endpoint = scrape_endpoint(api_url)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn scrape_endpoint(api_url: &str) -> Result<Url> {
    let mut base = Url::parse(api_url).map_err(|e| Error::InvalidUrl(format!("{api_url}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(Error::InvalidUrl(api_url.to_string()));
    }
    // keep any path prefix: "http://host/api" -> "http://host/api/scrape"
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SCRAPE_PATH)
        .map_err(|e| Error::InvalidUrl(format!("{api_url}: {e}")))
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        log::info!("searching {:?} via {}", request.keyword, self.endpoint);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let parsed: SearchResponse = serde_json::from_slice(&body)?;
            log::info!(
                "received {} articles for {:?}",
                parsed.results.as_ref().map_or(0, Vec::len),
                request.keyword
            );
            return Ok(parsed);
        }

        // any body shape is acceptable on failure
        let message = serde_json::from_slice::<FailureBody>(&body)
            .ok()
            .and_then(FailureBody::into_message);
        log::warn!(
            "search for {:?} failed with {status}: {message:?}",
            request.keyword
        );
        Err(Error::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
