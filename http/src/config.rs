//! Adapter settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL every request path is appended to, e.g. `https://api.example.com/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Bearer token attached to every request, if any
    pub token: Option<String>,
    /// Connect directly, ignoring any system proxy settings
    #[serde(default)]
    pub no_proxy: bool,
}

impl HttpConfig {
    /// Settings for `base_url` with the default timeout and no token
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
            no_proxy: false,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Bypass system proxies, for backends on a local or private network
    #[must_use]
    pub const fn with_no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// The timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn proxies_are_honoured_unless_disabled() {
        let config = HttpConfig::new("http://localhost:8080");
        assert!(!config.no_proxy);
        assert!(config.with_no_proxy().no_proxy);
    }

    #[test]
    fn no_proxy_defaults_to_false_when_absent() {
        let config: HttpConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost", "timeout_secs": 5, "token": null}"#).unwrap();
        assert!(!config.no_proxy);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
