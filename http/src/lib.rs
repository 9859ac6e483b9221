//! # Slicekit HTTP
//!
//! reqwest-backed [`ApiClient`](slicekit_resource::ApiClient) for resource
//! slices: joins the base URL and request path, encodes query pairs, attaches
//! a bearer token and applies the configured timeout.
//!
//! ## Example
//!
//! ```no_run
//! use slicekit_http::{HttpApiClient, HttpConfig};
//!
//! # fn main() -> Result<(), slicekit_http::HttpClientError> {
//! let config = HttpConfig::new("https://api.example.com/api")
//!     .with_timeout_secs(10)
//!     .with_token("secret");
//! let client = HttpApiClient::new(&config)?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use auth::{StaticToken, TokenProvider};
pub use client::HttpApiClient;
pub use config::{HttpConfig, DEFAULT_TIMEOUT_SECS};
pub use error::HttpClientError;
