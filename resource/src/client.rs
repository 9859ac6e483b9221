//! The HTTP client seam.
//!
//! The slice engine never talks to a concrete HTTP stack. It builds
//! [`ApiRequest`] values and hands them to an [`ApiClient`], which is injected
//! through the reducer environment. Authentication, token refresh and
//! timeouts live behind this trait.

use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// HTTP method of an API request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query-string pairs
///
/// Unset values never make it into the query: `None` and blank strings are
/// skipped on insertion, so the wire never carries `?Status=` or `?Status=null`.
/// Zero is a real value and is always sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Empty parameter set
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a value, replacing any previous value for the key
    ///
    /// Values whose text form is blank are omitted.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        self.0.retain(|(k, _)| *k != key);
        if !value.trim().is_empty() {
            self.0.push((key, value));
        }
    }

    /// Insert an optional value; `None` leaves the key absent
    pub fn insert_opt<T: Display>(&mut self, key: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Builder-style [`QueryParams::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for a key, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A request for the API client to execute
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`
    pub path: String,
    /// Query-string parameters
    pub query: QueryParams,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Request without query or body
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Attach query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// What came back from the server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, `None` when empty or not JSON
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Response with a JSON body
    #[must_use]
    pub const fn new(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Response without a body
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request never produced a response (DNS, connect, timeout, TLS...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Message from the underlying client; may be empty
    pub message: String,
}

impl TransportError {
    /// Create a transport error from the client's message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Future returned by [`ApiClient::execute`]
pub type ApiFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + 'a>>;

/// Issues authenticated requests against the backend
///
/// Any HTTP status is a successful `execute`; only a missing response is a
/// [`TransportError`]. Interpreting statuses and envelopes is the job of the
/// operation layer.
pub trait ApiClient: Send + Sync {
    /// Execute one request
    fn execute(&self, request: ApiRequest) -> ApiFuture<'_>;
}
