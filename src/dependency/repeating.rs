//! Memoization of dependency resolution across verification tasks.

use crate::dependency::{Dependency, DependencyResolution, DependencyResolver};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Wraps a delegate with a dependency-to-result memo, so repeated
/// resolution of the same dependency across many verification tasks costs
/// one repository round-trip.
///
/// This is the sole synchronization point when one instance is shared by
/// concurrent tasks. Concurrent first-requests for the same uncached
/// dependency may both invoke the delegate, but the first stored result
/// wins and every caller observes that value.
pub struct RepeatingResolver<R> {
    delegate: R,
    memo: RwLock<FxHashMap<Dependency, DependencyResolution>>,
}

impl<R: DependencyResolver> RepeatingResolver<R> {
    /// Wrap a delegate resolver.
    pub fn new(delegate: R) -> Self {
        Self {
            delegate,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of memoized dependencies.
    pub fn memoized_len(&self) -> usize {
        self.memo.read().len()
    }
}

impl<R: DependencyResolver> DependencyResolver for RepeatingResolver<R> {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        {
            let memo = self.memo.read();
            if let Some(result) = memo.get(dependency) {
                trace!(%dependency, "dependency resolution memo hit");
                return result.clone();
            }
        }

        // Delegate outside the lock: resolution may block on the network.
        let result = self.delegate.resolve(dependency);

        let mut memo = self.memo.write();
        if let Some(existing) = memo.get(dependency) {
            // Lost the race; converge on the stored value.
            return existing.clone();
        }
        memo.insert(dependency.clone(), result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::PluginArtifact;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDelegate {
        calls: AtomicUsize,
    }

    impl DependencyResolver for CountingDelegate {
        fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            // Distinct version per call, to expose any non-convergence.
            DependencyResolution::Found(Arc::new(PluginArtifact::new(
                dependency.id.clone(),
                format!("v{call}"),
            )))
        }
    }

    #[test]
    fn test_second_resolution_is_memoized() {
        let resolver = RepeatingResolver::new(CountingDelegate { calls: AtomicUsize::new(0) });
        let dependency = Dependency::plugin("org.demo");

        let first = resolver.resolve(&dependency);
        let second = resolver.resolve(&dependency);

        assert_eq!(resolver.delegate.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            first.artifact().unwrap().version,
            second.artifact().unwrap().version
        );
    }

    #[test]
    fn test_optional_and_mandatory_are_distinct_keys() {
        let resolver = RepeatingResolver::new(CountingDelegate { calls: AtomicUsize::new(0) });

        resolver.resolve(&Dependency::plugin("org.demo"));
        resolver.resolve(&Dependency::plugin("org.demo").optional());

        assert_eq!(resolver.memoized_len(), 2);
    }

    #[test]
    fn test_concurrent_callers_converge_on_one_result() {
        let resolver = Arc::new(RepeatingResolver::new(CountingDelegate {
            calls: AtomicUsize::new(0),
        }));
        let dependency = Dependency::plugin("org.demo");

        let versions: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let resolver = Arc::clone(&resolver);
                    let dependency = dependency.clone();
                    scope.spawn(move || {
                        resolver
                            .resolve(&dependency)
                            .artifact()
                            .unwrap()
                            .version
                            .to_string()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // The delegate may have run more than once under the race, but all
        // callers must observe the same stored value.
        let first = &versions[0];
        assert!(versions.iter().all(|v| v == first));
    }
}
