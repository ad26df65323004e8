//! Fallback chains — precedence policy as data.

use crate::dependency::{Dependency, DependencyResolution, DependencyResolver};
use std::sync::Arc;

/// Tries a primary resolver and, only on `NotFound`, a secondary.
///
/// `Found` and `CycleDetected` short-circuit: a detected cycle is an answer
/// about the dependency, not an absence to fall through from. Chains nest:
/// `FallbackResolver(a, FallbackResolver(b, c))` encodes the precedence
/// a > b > c, and that order is the policy, preserved exactly.
pub struct FallbackResolver {
    primary: Arc<dyn DependencyResolver>,
    secondary: Arc<dyn DependencyResolver>,
}

impl FallbackResolver {
    pub fn new(
        primary: Arc<dyn DependencyResolver>,
        secondary: Arc<dyn DependencyResolver>,
    ) -> Self {
        Self { primary, secondary }
    }
}

impl DependencyResolver for FallbackResolver {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        match self.primary.resolve(dependency) {
            DependencyResolution::NotFound { .. } => self.secondary.resolve(dependency),
            answered => answered,
        }
    }
}

/// Gates an inner resolver behind a predicate on the dependency.
///
/// Dependencies failing the predicate get `NotFound` with the configured
/// reason and never reach the inner resolver. Placed inside a fallback
/// chain, this expresses policies like "module ids and first-party ids may
/// fall through to the download resolver, third-party ids may not".
pub struct FilteredResolver {
    inner: Arc<dyn DependencyResolver>,
    predicate: Box<dyn Fn(&Dependency) -> bool + Send + Sync>,
    reason: Arc<str>,
}

impl FilteredResolver {
    pub fn new(
        inner: Arc<dyn DependencyResolver>,
        predicate: impl Fn(&Dependency) -> bool + Send + Sync + 'static,
        reason: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            inner,
            predicate: Box::new(predicate),
            reason: reason.into(),
        }
    }
}

impl DependencyResolver for FilteredResolver {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        if (self.predicate)(dependency) {
            self.inner.resolve(dependency)
        } else {
            DependencyResolution::not_found(format!("{dependency}: {}", self.reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::PluginArtifact;
    use smol_str::SmolStr;

    struct MapResolver {
        known: Vec<(&'static str, &'static str)>,
    }

    impl DependencyResolver for MapResolver {
        fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
            for (id, version) in &self.known {
                if dependency.id == *id {
                    return DependencyResolution::Found(Arc::new(PluginArtifact::new(
                        *id, *version,
                    )));
                }
            }
            DependencyResolution::not_found(format!("{dependency} unknown"))
        }
    }

    struct CycleResolver;

    impl DependencyResolver for CycleResolver {
        fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
            DependencyResolution::CycleDetected { path: vec![dependency.id.clone()] }
        }
    }

    #[test]
    fn test_primary_shadows_secondary() {
        let chain = FallbackResolver::new(
            Arc::new(MapResolver { known: vec![("org.demo", "1.0")] }),
            Arc::new(MapResolver { known: vec![("org.demo", "9.9"), ("org.other", "2.0")] }),
        );

        let hit = chain.resolve(&Dependency::plugin("org.demo"));
        assert_eq!(hit.artifact().unwrap().version, "1.0");

        let fallthrough = chain.resolve(&Dependency::plugin("org.other"));
        assert_eq!(fallthrough.artifact().unwrap().version, "2.0");
    }

    #[test]
    fn test_cycle_short_circuits() {
        let chain = FallbackResolver::new(
            Arc::new(CycleResolver),
            Arc::new(MapResolver { known: vec![("org.demo", "1.0")] }),
        );

        assert!(matches!(
            chain.resolve(&Dependency::plugin("org.demo")),
            DependencyResolution::CycleDetected { .. }
        ));
    }

    #[test]
    fn test_filter_gates_third_party_fallthrough() {
        let first_party_prefix: SmolStr = "com.host.".into();
        let download = Arc::new(MapResolver {
            known: vec![("com.host.tools", "5.0"), ("org.thirdparty", "1.0")],
        });
        let gated = FilteredResolver::new(
            download,
            move |dep| dep.is_module || dep.id.starts_with(first_party_prefix.as_str()),
            "third-party plugins are not downloaded for this check",
        );

        assert!(gated.resolve(&Dependency::plugin("com.host.tools")).is_found());
        match gated.resolve(&Dependency::plugin("org.thirdparty")) {
            DependencyResolution::NotFound { reason } => {
                assert!(reason.contains("org.thirdparty"));
                assert!(reason.contains("not downloaded"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
