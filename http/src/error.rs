//! Error types for the HTTP adapter

use thiserror::Error;

/// Errors building an [`crate::HttpApiClient`]
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The base URL is empty or not `http(s)://`
    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// reqwest refused the client configuration
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
