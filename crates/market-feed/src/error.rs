//! Feed error types

use options_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport failure or timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Well-formed response without the data asked for
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<FeedError> for EngineError {
    fn from(e: FeedError) -> Self {
        EngineError::UpstreamData(e.to_string())
    }
}
