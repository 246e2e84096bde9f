//! Package resolution error types.

use thiserror::Error;

/// Error while resolving the package to fuzz.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("package path `{0}` must not contain ... wildcards")]
    WildcardPattern(String),

    #[error("failed to load packages: {0}")]
    QueryFailed(String),

    #[error("failed to decode package metadata: {0}")]
    MalformedOutput(String),

    #[error("errors loading `{pattern}`:\n{}", .errors.join("\n"))]
    PackageErrors { pattern: String, errors: Vec<String> },

    #[error("no package found for `{0}`")]
    NoPackage(String),

    #[error("package path `{pattern}` is ambiguous: it matches {}", .matches.join(", "))]
    Ambiguous {
        pattern: String,
        matches: Vec<String>,
    },
}
