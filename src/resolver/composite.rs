//! Ordered composition of resolvers with class-path shadowing.

use crate::base::ClassName;
use crate::resolver::{ClassResolver, ResolutionResult};
use indexmap::IndexSet;
use smol_str::SmolStr;
use std::sync::Arc;

/// A [`ClassResolver`] over an ordered list of children.
///
/// `resolve_class` tries each child in list order and returns the first
/// answer that is not [`ResolutionResult::NotFound`]. This reproduces
/// class-path shadowing: the first source that claims a name answers for
/// it, even when its entry is [`ResolutionResult::Invalid`]. The returned
/// origin is whichever child produced the hit, which is how downstream code
/// distinguishes "came from the plugin" from "came from the target API".
///
/// Aggregate views are the union across all children, computed once at
/// construction; child order does not matter for them, only for lookups.
/// A composite of composites behaves identically to a single flattened
/// composite with the same effective order.
///
/// Immutable after construction. The composite does not own the lifetime of
/// its children's backing resources; the constructing task does.
pub struct CompositeResolver {
    children: Vec<Arc<dyn ClassResolver>>,
    all_classes: IndexSet<ClassName>,
    all_packages: IndexSet<SmolStr>,
}

impl CompositeResolver {
    /// Build from an ordered list of children; earlier children shadow
    /// later ones.
    pub fn new(children: Vec<Arc<dyn ClassResolver>>) -> Self {
        let mut all_classes = IndexSet::new();
        let mut all_packages = IndexSet::new();
        for child in &children {
            all_classes.extend(child.all_classes());
            all_packages.extend(child.all_packages());
        }

        Self { children, all_classes, all_packages }
    }

    /// The ordered children.
    pub fn children(&self) -> &[Arc<dyn ClassResolver>] {
        &self.children
    }
}

impl ClassResolver for CompositeResolver {
    fn resolve_class(&self, name: &ClassName) -> ResolutionResult {
        for child in &self.children {
            let result = child.resolve_class(name);
            if !result.is_not_found() {
                return result;
            }
        }
        ResolutionResult::NotFound
    }

    fn all_classes(&self) -> IndexSet<ClassName> {
        self.all_classes.clone()
    }

    fn all_packages(&self) -> IndexSet<SmolStr> {
        self.all_packages.clone()
    }

    fn contains_class(&self, name: &ClassName) -> bool {
        self.all_classes.contains(name)
    }

    fn contains_package(&self, package: &str) -> bool {
        self.all_packages.contains(package)
    }
}
