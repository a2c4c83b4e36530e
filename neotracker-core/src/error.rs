//! Error taxonomy for the NeoWs feed operations

use thiserror::Error;

/// Errors raised by the feed client and its parsers.
///
/// Every failure is terminal for the operation that produced it; the
/// client never retries.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The transport request itself failed (DNS, connect, timeout, body read).
    #[error("feed request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("feed request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body decoded, but not into the expected shape.
    #[error("unexpected feed payload: {0}")]
    Data(String),
}

impl FeedError {
    /// Data-shape error with context about the offending field.
    pub fn data(msg: impl Into<String>) -> Self {
        FeedError::Data(msg.into())
    }
}
