//! mmake Core Library
//!
//! Resolves remote Makefile includes such as `github.com/tj/mmake/help.mk@v1`
//! and installs them where `make -I` can find them.

pub mod config;
pub mod include;
pub mod resolver;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, GithubConfig, MmakeConfig};

    // Includes
    pub use crate::include::{Include, IncludeInstaller, InstallStatus, Installed, parse_includes};

    // Resolvers
    pub use crate::resolver::{
        CachedResolver, Content, GithubResolver, HttpResolver, ResolveError, Resolver,
        ResolverChain, default_resolver,
    };
}
