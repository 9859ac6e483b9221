//! Error types for resource operations

use thiserror::Error;

/// Why an operation was rejected
///
/// The `Display` form of every variant is the message a view shows to the
/// user, and is what lands in the slice's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// No response reached us
    #[error("{0}")]
    Transport(String),

    /// The server answered with `isSuccess=false` or a non-2xx status
    #[error("{message}")]
    Application {
        /// HTTP status, when one was received
        status: Option<u16>,
        /// Server-provided or fallback message
        message: String,
    },

    /// A by-id fetch succeeded without an entity
    #[error("{0}")]
    NotFound(String),

    /// Rejected on the client before any request was made
    #[error("{0}")]
    Validation(String),
}

impl OperationError {
    /// Short label for logs and metrics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Application { .. } => "application",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
        }
    }

    /// The HTTP status that caused this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => *status,
            _ => None,
        }
    }
}
