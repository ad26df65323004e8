//! A memoizing resolver wrapper.

use crate::base::ClassName;
use crate::resolver::{ClassResolver, ResolutionResult};
use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

/// Wraps a delegate resolver and memoizes its answers, including
/// [`ResolutionResult::NotFound`].
///
/// Once any result has been cached for a name, the delegate is never
/// queried for that name again. `all_classes`/`all_packages` delegate
/// directly: they are assumed cheap and stable for the delegate's lifetime.
///
/// The memo table is the only mutable state and is safe for concurrent
/// readers and writers. Under a race, two callers may both query the
/// delegate for the same uncached name, but the first stored result wins
/// and every caller observes it.
pub struct CacheResolver<R> {
    delegate: R,
    memo: RwLock<FxHashMap<ClassName, ResolutionResult>>,
}

impl<R: ClassResolver> CacheResolver<R> {
    /// Wrap a delegate resolver.
    pub fn new(delegate: R) -> Self {
        Self {
            delegate,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of memoized names.
    pub fn cached_len(&self) -> usize {
        self.memo.read().len()
    }
}

impl<R: ClassResolver> ClassResolver for CacheResolver<R> {
    fn resolve_class(&self, name: &ClassName) -> ResolutionResult {
        // Fast path: already memoized (read lock)
        {
            let memo = self.memo.read();
            if let Some(result) = memo.get(name) {
                trace!(class = %name, "resolution cache hit");
                return result.clone();
            }
        }

        // Compute outside the lock; delegate lookups may block on I/O.
        let result = self.delegate.resolve_class(name);

        let mut memo = self.memo.write();
        // Double-check after acquiring the write lock: a concurrent caller
        // may have stored a result first, and its value must win.
        if let Some(existing) = memo.get(name) {
            return existing.clone();
        }
        memo.insert(name.clone(), result.clone());
        result
    }

    fn all_classes(&self) -> IndexSet<ClassName> {
        self.delegate.all_classes()
    }

    fn all_packages(&self) -> IndexSet<SmolStr> {
        self.delegate.all_packages()
    }

    fn contains_class(&self, name: &ClassName) -> bool {
        self.delegate.contains_class(name)
    }

    fn contains_package(&self, package: &str) -> bool {
        self.delegate.contains_package(package)
    }
}
