//! Error types for feed retrieval and parsing.

use thiserror::Error;

/// Errors that can occur while extracting spots from a feed payload.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Payload is not valid JSON.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload or feed entry is not a JSON object.
    #[error("Expected a JSON object for {0}")]
    NotAnObject(&'static str),

    /// Payload has no `feeds` array.
    #[error("Missing 'feeds' array")]
    MissingFeeds,

    /// The `feeds` array has no entries.
    #[error("Feed has no entries")]
    EmptyFeed,

    /// A required field is absent or null.
    #[error("Missing field '{0}'")]
    MissingField(String),

    /// A numeric field holds something that is not a number.
    #[error("Field '{field}' is not a number: {value}")]
    InvalidNumber { field: String, value: String },
}

/// Errors that can occur when fetching a feed over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with something other than 200.
    #[error("Error response code: {0}")]
    Status(u16),

    /// Reading the response body failed.
    #[error("Failed to read response: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered 200 with an empty body.
    #[error("Empty response body")]
    EmptyResponse,

    /// Body could not be turned into spots.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Client settings were rejected.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl FetchError {
    /// Classify a failure while reading the response body.
    ///
    /// The blocking response wraps its own timeout in an `io::Error`, so the
    /// inner reqwest error is checked before falling back to `Io`.
    pub fn from_body_read(err: std::io::Error) -> Self {
        let inner_timeout = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout);

        if inner_timeout || err.kind() == std::io::ErrorKind::TimedOut {
            FetchError::Timeout
        } else {
            FetchError::Io(err)
        }
    }
}
