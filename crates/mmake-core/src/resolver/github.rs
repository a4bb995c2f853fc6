//! GitHub include references.
//!
//! Rewrites `github.com/<user>/<repo>[/<file>][@<version>]` into the
//! raw.githubusercontent.com URL for that file and hands it to the wrapped
//! resolver.

use url::Url;

use super::{Content, ResolveError, Resolver};

const GITHUB_HOST: &str = "github.com";
const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_VERSION: &str = "master";
const DEFAULT_FILE: &str = "index.mk";

/// Resolves GitHub references by delegating a raw content URL to `inner`.
#[derive(Debug, Clone)]
pub struct GithubResolver<R> {
    inner: R,
    default_version: String,
}

impl<R: Resolver> GithubResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            default_version: DEFAULT_VERSION.to_string(),
        }
    }

    /// Use `version` when a reference has no `@version` suffix.
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    /// Construct the raw content URL for a reference without fetching it.
    ///
    /// # Example
    /// ```ignore
    /// let url = resolver.raw_url("github.com/tj/mmake/help.mk@v1.2.0")?;
    /// // Returns: "https://raw.githubusercontent.com/tj/mmake/v1.2.0/help.mk"
    /// ```
    pub fn raw_url(&self, reference: &str) -> Result<String, ResolveError> {
        // Full URLs belong to the HTTP resolver.
        if reference.contains("://") {
            return Err(ResolveError::NotSupported);
        }

        let url = Url::parse(&format!("https://{}", reference))?;

        // Exact authority match: no port, userinfo or case folding.
        let authority = reference.split('/').next().unwrap_or_default();
        if authority != GITHUB_HOST || url.host_str() != Some(GITHUB_HOST) {
            return Err(ResolveError::NotSupported);
        }

        let path = url.path();
        let path = path.strip_prefix('/').unwrap_or(path);

        // "user/repo/foo.mk@v2" -> ("user/repo/foo.mk", "v2")
        let (path, version) = match path.split_once('@') {
            Some((path, version)) if !version.is_empty() => (path, version),
            Some((path, _)) => (path, self.default_version.as_str()),
            None => (path, self.default_version.as_str()),
        };

        // The file keeps its embedded slashes: "user/repo/baz/stuff.mk"
        let mut parts = path.splitn(3, '/');
        let user = parts.next().unwrap_or_default();
        let repo = parts.next().unwrap_or_default();
        if user.is_empty() || repo.is_empty() {
            return Err(ResolveError::MissingField);
        }
        let file = parts.next().filter(|f| !f.is_empty()).unwrap_or(DEFAULT_FILE);

        Ok(format!(
            "{}/{}/{}/{}/{}",
            RAW_CONTENT_BASE, user, repo, version, file
        ))
    }
}

impl<R: Resolver> Resolver for GithubResolver<R> {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        let raw = self.raw_url(reference)?;
        tracing::debug!(reference, url = %raw, "rewrote github include");
        self.inner.get(&raw)
    }
}
