//! Pattern parsing errors

use thiserror::Error;

/// Errors produced when parsing a route pattern string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPathError {
    /// An empty segment appeared somewhere other than the root path
    #[error("invalid route pattern `{pattern}`: empty segment")]
    EmptySegment { pattern: String },

    /// More than one `[...name]` segment in a single pattern
    #[error("invalid route pattern `{pattern}`: at most one wildcard segment is allowed")]
    MultipleWildcards { pattern: String },

    /// The pattern does not start with `/`
    #[error("invalid route pattern `{pattern}`: must start with `/`")]
    MissingLeadingSlash { pattern: String },
}
