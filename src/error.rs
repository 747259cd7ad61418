use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a keyword or URL")]
    EmptyKeyword,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Search rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Rendering error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
