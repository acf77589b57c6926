use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Every failure is terminal. The `Display` form is what gets printed to the user.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Image path is required")]
    MissingImage,

    #[error("Failed to read config file: {0}")]
    ReadConfig(#[source] io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("Failed to open image file: {0}")]
    OpenImage(#[source] io::Error),
    #[error("Failed to read image file: {0}")]
    ReadImage(#[source] io::Error),

    #[error("Failed to create request: invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Failed to create request: {0}")]
    BuildRequest(#[source] reqwest::Error),
    #[error("Failed to send request: {0}")]
    SendRequest(#[source] reqwest::Error),
    #[error("Failed to read response: {0}")]
    ReadResponse(#[source] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("Failed to parse response JSON: {0}")]
    ParseResponse(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}
