//! Registry that accepts new routes while lookups are in flight.

use http::Method;
use parking_lot::RwLock;

use super::{MatchResult, Registry};
use crate::error::RouteError;

/// A [`Registry`] behind a reader–writer lock.
///
/// Lookups take the read lock and never wait on each other; `register` takes
/// the write lock. Use a plain [`Registry`] when all routes are known before
/// serving starts.
pub struct SharedRegistry<H> {
    inner: RwLock<Registry<H>>,
}

impl<H> SharedRegistry<H> {
    pub fn new() -> Self {
        Self::from(Registry::new())
    }

    pub fn register(&self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.inner.write().register(method, pattern, handler)
    }

    /// Runs `f` on the lookup result while the read lock is held.
    ///
    /// The result borrows the registry, so it cannot escape the closure; copy
    /// out what you need (e.g. clone an `Arc` handler, call
    /// [`Params::to_path_params`](super::Params::to_path_params)).
    ///
    /// Reads are recursive: `f` may call `with_match`, `len` or `is_empty` on
    /// the same registry even while a writer is queued. Calling
    /// [`register`](Self::register) from inside `f` deadlocks.
    pub fn with_match<R>(
        &self,
        method: &Method,
        path: &str,
        f: impl FnOnce(MatchResult<'_, '_, H>) -> R,
    ) -> R {
        let registry = self.inner.read_recursive();
        f(registry.lookup(method, path))
    }

    pub fn len(&self) -> usize {
        self.inner.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read_recursive().is_empty()
    }
}

impl<H> Default for SharedRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> From<Registry<H>> for SharedRegistry<H> {
    fn from(registry: Registry<H>) -> Self {
        Self { inner: RwLock::new(registry) }
    }
}
