use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-200 status.
    #[error("search API returned status {status}")]
    Api { status: u16 },

    #[error("could not parse search response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
