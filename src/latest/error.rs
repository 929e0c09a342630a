use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatestError {
    #[error("API key rejected while fetching latest readings")]
    Unauthorized,

    #[error("Rate limited by the latest-readings endpoint; retry later")]
    RateLimited,

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Failed to decode response from {0}")]
    Decode(String, #[source] reqwest::Error),
}

impl LatestError {
    /// Whether this failure invalidates the whole session rather than a
    /// single location. A rejected key or a rate limit will fail every
    /// subsequent request, so the batch must stop immediately.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, LatestError::Unauthorized | LatestError::RateLimited)
    }
}
