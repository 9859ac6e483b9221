//! Where bearer tokens come from.
//!
//! Refreshing expired tokens is the provider's business; the adapter only
//! asks for the current one before each request.

/// Supplies the bearer token for the next request
pub trait TokenProvider: Send + Sync {
    /// Current token; `None` sends the request unauthenticated
    fn token(&self) -> Option<String>;
}

/// A fixed token, or none at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Always send `token`
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Never authenticate
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticToken {
    fn from(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
