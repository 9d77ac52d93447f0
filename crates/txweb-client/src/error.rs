//! Error types for txweb-client

use thiserror::Error;

/// Failures while constructing a client (request failures are `CoreError`s)
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid bearer token: {message}")]
    InvalidToken { message: String },

    #[error("Failed to build HTTP client")]
    Build(#[from] reqwest::Error),
}
