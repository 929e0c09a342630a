use crate::directory::error::DirectoryError;
use crate::latest::error::LatestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAqError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Latest(#[from] LatestError),

    #[error("No monitoring locations matched city '{city}'")]
    CityUnresolved { city: String },

    #[error("No recent measurements available for city '{city}'")]
    NoData { city: String },

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("Failed to construct the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
