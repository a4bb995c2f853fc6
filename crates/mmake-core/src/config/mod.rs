//! Configuration for mmake.toml
//!
//! Loaded from `~/.config/mmake/mmake.toml` unless a path is given explicitly.
//! Every field has a default, so a missing file is a valid configuration.

pub mod parser;
pub mod store;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use store::ConfigStore;

use crate::resolver::{
    CachedResolver, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpResolver, ResolverChain,
    default_resolver,
};

/// Root configuration structure for mmake.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmakeConfig {
    /// Directory remote includes are installed into (passed to make as -I)
    #[serde(default = "default_include_dir")]
    pub include_dir: PathBuf,

    /// Directory for cached fetches
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// User agent for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Branch used when a reference has no `@version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,
}

fn default_include_dir() -> PathBuf {
    PathBuf::from("/usr/local/include")
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("mmake")
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for MmakeConfig {
    fn default() -> Self {
        Self {
            include_dir: default_include_dir(),
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            github: GithubConfig::default(),
        }
    }
}

impl MmakeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn http(&self) -> anyhow::Result<HttpResolver> {
        HttpResolver::new(&self.user_agent, self.timeout())
    }

    /// GitHub + HTTP resolver stack with fetches cached under `cache_dir`.
    /// `refresh` re-fetches and overwrites cached entries.
    pub fn resolver(&self, refresh: bool) -> anyhow::Result<ResolverChain> {
        let cache = CachedResolver::new(self.http()?, &self.cache_dir).refresh(refresh);
        Ok(default_resolver(cache, self.github.default_version.as_deref()))
    }

    /// GitHub + HTTP resolver stack that never touches the cache.
    pub fn uncached_resolver(&self) -> anyhow::Result<ResolverChain> {
        Ok(default_resolver(
            self.http()?,
            self.github.default_version.as_deref(),
        ))
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }
        if let Some(version) = &self.github.default_version {
            if version.is_empty() || version.contains(char::is_whitespace) {
                anyhow::bail!("github.default_version is not a valid ref: {:?}", version);
            }
        }
        Ok(())
    }
}
