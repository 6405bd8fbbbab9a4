//! Registration error taxonomy
//!
//! Every variant here is a programmer error surfaced during the
//! configuration phase: fail fast, never retried, never recovered.
//! A request-time miss is *not* an error; the matcher returns
//! [`crate::matcher::RouteExistence::NotFound`] / `None` for that.

use obelus_router::InvalidPathError;
use thiserror::Error;

/// Errors raised by route registration and configuration
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed pattern string
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    /// A static-paths tuple does not fit the pattern's slug arity
    #[error("static path tuple for `{pattern}` has wrong arity: expected {expected}, got {got}")]
    StaticPathMismatch {
        pattern: String,
        expected: usize,
        got: usize,
    },

    /// The same dynamic pattern was registered twice
    #[error("route `{0}` is already registered")]
    DuplicateRoute(String),

    /// Two registrations expanded to the same concrete literal path
    #[error("component for path `{0}` is already registered")]
    DuplicateComponent(String),

    /// A second root registration
    #[error("root element is already registered")]
    DuplicateRoot,

    /// An API registration collides on `(method, path)`, or a static-mode
    /// API path is reused under a different method
    #[error("api route `{method} {path}` is already registered")]
    DuplicateApi { method: String, path: String },

    /// A user registration would produce a `route:`-prefixed element id,
    /// which is reserved for internal use
    #[error("element id `{0}` uses the reserved `route:` prefix")]
    ReservedElementId(String),

    /// Registration attempted after the configuration phase completed
    #[error("configuration phase is closed; registrations are no longer accepted")]
    ConfigurationClosed,

    /// A route table snapshot named by configuration could not be loaded
    #[error("failed to load route table snapshot from `{path}`")]
    SnapshotLoad {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}
