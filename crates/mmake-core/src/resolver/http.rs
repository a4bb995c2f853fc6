//! Plain HTTP(S) fetches.

use std::time::Duration;

use anyhow::Context;
use url::Url;

use super::{Content, ResolveError, Resolver};

pub const DEFAULT_USER_AGENT: &str = concat!("mmake/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `http://` and `https://` URLs with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: reqwest::blocking::Client,
}

impl HttpResolver {
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// True when `reference` is an absolute http(s) URL.
    pub fn supports(reference: &str) -> bool {
        Url::parse(reference)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

impl Resolver for HttpResolver {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        if !Self::supports(reference) {
            return Err(ResolveError::NotSupported);
        }

        tracing::debug!(url = reference, "fetching include");
        let response = self
            .client
            .get(reference)
            .send()
            .map_err(|source| ResolveError::Http {
                url: reference.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: reference.to_string(),
                status,
            });
        }

        Ok(Box::new(response))
    }
}
