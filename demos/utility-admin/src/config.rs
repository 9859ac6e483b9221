//! Configuration management for the admin application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that are present but malformed are errors, not silently replaced.

use serde::{Deserialize, Serialize};
use slicekit_http::{HttpConfig, DEFAULT_TIMEOUT_SECS};
use slicekit_resource::{SliceConfig, StalePolicy, DEFAULT_PAGE_SIZE};
use std::env;
use thiserror::Error;

/// Default backend when `API_BASE_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// A configuration variable that is set but unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value does not parse
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Backend connection
    pub api: HttpConfig,
    /// Settings shared by every resource slice
    pub slices: SliceConfig,
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api: HttpConfig::new(DEFAULT_API_BASE_URL),
            slices: SliceConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `API_BASE_URL` | `http://localhost:5000/api` |
    /// | `API_TOKEN` | none |
    /// | `API_TIMEOUT_SECS` | 30 |
    /// | `API_NO_PROXY` | false |
    /// | `DEFAULT_PAGE_SIZE` | 10 |
    /// | `STALE_POLICY` | `latest-issued-wins` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to a value that does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut api = HttpConfig::new(var("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()))
            .with_timeout_secs(parse(&var, "API_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS));
        api.token = var("API_TOKEN");
        api.no_proxy = parse(&var, "API_NO_PROXY")?.unwrap_or(false);

        let page_size = parse::<u32>(&var, "DEFAULT_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_PAGE_SIZE",
                value: "0".to_string(),
                reason: "page size must be at least 1".to_string(),
            });
        }
        let stale_policy = parse::<StalePolicy>(&var, "STALE_POLICY")?.unwrap_or_default();

        Ok(Self {
            api,
            slices: SliceConfig::default()
                .with_page_size(page_size)
                .with_stale_policy(stale_policy),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse<T>(var: impl Fn(&str) -> Option<String>, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(name)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        AdminConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load(&[]).unwrap(), AdminConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("API_BASE_URL", "https://billing.example.com/api"),
            ("API_TOKEN", "t0ken"),
            ("API_TIMEOUT_SECS", "5"),
            ("API_NO_PROXY", "true"),
            ("DEFAULT_PAGE_SIZE", "25"),
            ("STALE_POLICY", "last_settled_wins"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.api.base_url, "https://billing.example.com/api");
        assert_eq!(config.api.token.as_deref(), Some("t0ken"));
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.api.no_proxy);
        assert_eq!(config.slices.default_page_size, 25);
        assert_eq!(config.slices.stale_policy, StalePolicy::LastSettledWins);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn blank_token_means_no_token() {
        assert_eq!(load(&[("API_TOKEN", "  ")]).unwrap().api.token, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(matches!(
            load(&[("API_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { name: "API_TIMEOUT_SECS", .. })
        ));
        assert!(load(&[("DEFAULT_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("STALE_POLICY", "random")]).is_err());
        assert!(load(&[("API_NO_PROXY", "maybe")]).is_err());
    }
}
