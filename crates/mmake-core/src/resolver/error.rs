//! Resolver error taxonomy.

use std::path::PathBuf;

/// Errors returned by resolvers.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The reference could not be parsed as a URL.
    #[error("parsing include path: {0}")]
    Parse(#[from] url::ParseError),

    /// The reference belongs to another resolver.
    #[error("include not supported")]
    NotSupported,

    /// Owner or repository is missing from the reference path.
    #[error("user, repo required in include url")]
    MissingField,

    /// The HTTP request failed before a response arrived.
    #[error("fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetching {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cache {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// True for the "try the next resolver" sentinel.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, ResolveError::NotSupported)
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            source,
        }
    }
}
