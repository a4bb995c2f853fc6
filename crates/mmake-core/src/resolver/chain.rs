//! Ordered resolver dispatch.

use super::{Content, ResolveError, Resolver};

/// Tries each resolver in turn until one accepts the reference.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver; earlier resolvers take precedence.
    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Resolver for ResolverChain {
    /// Returns the first result that is not `NotSupported`, or `NotSupported`
    /// when no resolver claims the reference.
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        for resolver in &self.resolvers {
            match resolver.get(reference) {
                Err(ResolveError::NotSupported) => continue,
                result => return result,
            }
        }
        Err(ResolveError::NotSupported)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}
