//! Error types for talking to the news API.

use thiserror::Error;

/// Any way a news request can fail. The browser treats all of them alike:
/// log, keep the previous results, move on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request URL could not be built from the configured base URL
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// Connection, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("news API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body exceeded the read cap
    #[error("response too large (>{limit} bytes)")]
    TooLarge { limit: usize },

    /// Body was not the expected JSON document
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;
