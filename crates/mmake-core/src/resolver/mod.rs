//! Include resolution.
//!
//! A resolver turns an include reference into a readable byte stream. The
//! resolvers here are small and composable:
//! - `GithubResolver` rewrites `github.com/user/repo/file@version` into a raw
//!   content URL and delegates the fetch
//! - `HttpResolver` fetches `http(s)://` URLs
//! - `CachedResolver` keeps fetched content on disk
//! - `ResolverChain` tries resolvers in order, skipping those that report
//!   `ResolveError::NotSupported`

mod cache;
mod chain;
mod error;
mod github;
mod http;

pub use cache::CachedResolver;
pub use chain::ResolverChain;
pub use error::ResolveError;
pub use github::GithubResolver;
pub use http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpResolver};

use std::io::Read;

/// Content returned by a resolver. Dropping it releases the underlying
/// connection or file handle.
pub type Content = Box<dyn Read + Send>;

/// Fetch contract shared by every resolver.
pub trait Resolver: Send + Sync {
    /// Resolve `reference` to its content.
    ///
    /// Returns `ResolveError::NotSupported` when the reference is outside this
    /// resolver's domain so an outer chain can try the next one.
    fn get(&self, reference: &str) -> Result<Content, ResolveError>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        (**self).get(reference)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        (**self).get(reference)
    }
}

impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        (**self).get(reference)
    }
}

/// Build the default resolver stack: GitHub references rewritten to raw
/// content URLs, then plain URLs, all fetched through `fetcher`.
///
/// Wrap `fetcher` in a `CachedResolver` to cache by the rewritten URL.
pub fn default_resolver<F>(fetcher: F, default_version: Option<&str>) -> ResolverChain
where
    F: Resolver + 'static,
{
    let fetcher = std::sync::Arc::new(fetcher);
    let mut github = GithubResolver::new(fetcher.clone());
    if let Some(version) = default_version {
        github = github.with_default_version(version);
    }

    ResolverChain::new().with(github).with(fetcher)
}

#[cfg(test)]
pub(crate) mod testing;
