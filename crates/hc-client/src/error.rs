//! Error types for resource fetches.

use thiserror::Error;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching one resource collection.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused connection, TLS, timeout).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The API answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    /// Short machine-readable kind, used in logs and run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Body { .. } => "body",
            FetchError::Decode { .. } => "decode",
        }
    }
}
