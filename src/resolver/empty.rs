//! The zero-class resolver.

use crate::base::ClassName;
use crate::resolver::{ClassResolver, ResolutionResult};
use indexmap::IndexSet;
use smol_str::SmolStr;

/// A resolver that knows no classes.
///
/// Used as a safe default when no external classpath is configured.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyResolver;

impl ClassResolver for EmptyResolver {
    fn resolve_class(&self, _name: &ClassName) -> ResolutionResult {
        ResolutionResult::NotFound
    }

    fn all_classes(&self) -> IndexSet<ClassName> {
        IndexSet::new()
    }

    fn all_packages(&self) -> IndexSet<SmolStr> {
        IndexSet::new()
    }

    fn contains_class(&self, _name: &ClassName) -> bool {
        false
    }

    fn contains_package(&self, _package: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resolver_knows_nothing() {
        let resolver = EmptyResolver;
        assert!(resolver.resolve_class(&"any/Class".into()).is_not_found());
        assert!(resolver.all_classes().is_empty());
        assert!(resolver.all_packages().is_empty());
        assert!(!resolver.contains_package(""));
    }
}
