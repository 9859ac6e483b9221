//! The reqwest implementation of [`ApiClient`].

use crate::auth::{StaticToken, TokenProvider};
use crate::config::HttpConfig;
use crate::error::HttpClientError;
use reqwest::Client;
use slicekit_resource::{ApiClient, ApiFuture, ApiRequest, ApiResponse, Method, TransportError};
use std::sync::Arc;
use std::time::Instant;

/// Talks to the backend over HTTP
///
/// Every status code is a response; only failures to get one (connect,
/// timeout, TLS, body read) are [`TransportError`]s. Bodies that are empty
/// or not JSON come back as `None`.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpApiClient {
    /// Build a client from settings, using the configured static token
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::InvalidBaseUrl`] for a base URL that is not
    /// `http(s)://`, and [`HttpClientError::Build`] if reqwest rejects the
    /// configuration.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpClientError> {
        let tokens = StaticToken::from(config.token.clone());
        Self::with_token_provider(config, Arc::new(tokens))
    }

    /// Build a client whose tokens come from `tokens`
    ///
    /// # Errors
    ///
    /// Same as [`HttpApiClient::new`].
    pub fn with_token_provider(
        config: &HttpConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, HttpClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder().timeout(config.timeout());
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// The normalized base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            let pairs: Vec<(&str, &str)> = request.query.iter().collect();
            builder = builder.query(&pairs);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, %url, error = %e, "Request failed");
            metrics::counter!("http.requests.failed").increment(1);
            TransportError::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        metrics::histogram!("http.request.duration_seconds").record(start.elapsed().as_secs_f64());
        tracing::debug!(
            method = %request.method,
            %url,
            status,
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };
        Ok(ApiResponse { status, body })
    }
}

impl ApiClient for HttpApiClient {
    fn execute(&self, request: ApiRequest) -> ApiFuture<'_> {
        Box::pin(self.send(request))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_http() {
        let error = HttpApiClient::new(&HttpConfig::new("ftp://files")).unwrap_err();
        assert!(matches!(error, HttpClientError::InvalidBaseUrl(_)));
        assert!(HttpApiClient::new(&HttpConfig::new("")).is_err());
    }

    #[test]
    fn paths_join_the_base_url_once() {
        let client = HttpApiClient::new(&HttpConfig::new("https://api.example.com/api/")).unwrap();

        assert_eq!(client.base_url(), "https://api.example.com/api");
        assert_eq!(client.url("/meters/4"), "https://api.example.com/api/meters/4");
        assert_eq!(client.url("meters"), "https://api.example.com/api/meters");
    }
}
