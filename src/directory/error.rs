use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("API key rejected by the directory endpoint")]
    Unauthorized,

    #[error("Country '{0}' not found in the directory")]
    CountryNotFound(String),

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
