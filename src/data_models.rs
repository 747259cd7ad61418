use serde::{Deserialize, Serialize};

/// Number of articles asked for on every search.
pub const RESULT_COUNT: u32 = 20;

/// One article summary as returned by the scrape endpoint. Every field is
/// optional; the server leaves out whatever it could not extract.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub count: u32,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>) -> SearchRequest {
        SearchRequest {
            keyword: keyword.into(),
            count: RESULT_COUNT,
        }
    }
}

/// Body of a successful (2xx) response.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<Article>>,
}

/// Body of a failed (non-2xx) response.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FailureBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FailureBody {
    /// `message` wins over `error`; blank strings count as missing.
    pub fn into_message(self) -> Option<String> {
        non_blank(self.message).or_else(|| non_blank(self.error))
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
