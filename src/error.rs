//! Error types.
//!
//! Two families live here. [`RouteError`] is raised while routes are being
//! registered and always means the application is misconfigured. [`Error`]
//! covers the infrastructure failures of [`Server`](crate::Server).
//!
//! Request-time outcomes (unknown path, wrong method) are never errors: the
//! router reports them as a [`MatchResult`](crate::routing::MatchResult) and
//! the dispatch layer turns them into `404` / `405` responses.

use http::Method;

/// A route could not be registered.
///
/// Returned synchronously by [`Registry::register`](crate::routing::Registry::register).
/// A failed registration leaves the registry exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The pattern is malformed: empty parameter name, unterminated or empty
    /// `:|…|` segment, or a regex that does not compile.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Two different parameter names claim the same trie position.
    #[error(
        "ambiguous route `{pattern}`: parameter `:{name}` conflicts with \
         existing `:{existing}` at the same position"
    )]
    AmbiguousRoute {
        pattern: String,
        name: String,
        existing: String,
    },

    /// The same method + pattern is already bound to a handler.
    #[error("duplicate route {method} `{pattern}`")]
    DuplicateRoute { method: Method, pattern: String },
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.into(),
        }
    }
}

/// The error type returned by arbor's fallible server operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("invalid socket address `{0}`")]
    InvalidAddress(String),
}
