//! Class hierarchy realization.
//!
//! A [`ClassHierarchy`] is the superclass/interface ancestry of a class,
//! realized as a shared-ownership DAG: a class reachable via multiple paths
//! (diamonds) is resolved once and referenced, which prevents exponential
//! blowup and guarantees consistent flags per class.

mod visitor;

pub use visitor::ClassHierarchyVisitor;

use crate::base::{ClassName, ClassOrigin};
use crate::resolver::{ClassResolver, ResolutionResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// A node in a class ancestry graph.
///
/// Parent references point upward only (superclass and interfaces); the
/// graph is immutable once realized and may be traversed from multiple
/// threads concurrently.
#[derive(Debug)]
pub struct ClassHierarchy {
    /// The class's fully-qualified name.
    pub name: ClassName,
    /// Whether the class is an interface.
    pub is_interface: bool,
    /// Whether the class belongs to the target application's API, as judged
    /// by the predicate supplied to the builder.
    pub in_target_api: bool,
    /// The resolved superclass, if its name resolved.
    pub superclass: Option<Arc<ClassHierarchy>>,
    /// Resolved interfaces, in declaration order, skipping unresolved names.
    pub interfaces: Vec<Arc<ClassHierarchy>>,
}

/// Realizes [`ClassHierarchy`] graphs through a [`ClassResolver`].
///
/// Nodes are memoized by class name, so a class reachable via several paths
/// is realized once and shared. A parent name that does not resolve makes
/// that edge a leaf, not an error. A parent name already on the active
/// build path (malformed cyclic input) is dropped, so the realized graph is
/// always acyclic.
pub struct HierarchyBuilder<'a, R, P> {
    resolver: &'a R,
    is_target_origin: P,
    memo: FxHashMap<ClassName, Option<Arc<ClassHierarchy>>>,
}

impl<'a, R, P> HierarchyBuilder<'a, R, P>
where
    R: ClassResolver,
    P: Fn(&ClassOrigin) -> bool,
{
    /// Create a builder over a resolver and a "belongs to the target API"
    /// predicate on class origins.
    pub fn new(resolver: &'a R, is_target_origin: P) -> Self {
        Self {
            resolver,
            is_target_origin,
            memo: FxHashMap::default(),
        }
    }

    /// Realize the hierarchy rooted at `name`.
    ///
    /// Returns `None` if the root itself does not resolve.
    pub fn build(&mut self, name: &ClassName) -> Option<Arc<ClassHierarchy>> {
        let mut path = FxHashSet::default();
        self.build_node(name, &mut path)
    }

    fn build_node(
        &mut self,
        name: &ClassName,
        path: &mut FxHashSet<ClassName>,
    ) -> Option<Arc<ClassHierarchy>> {
        if let Some(memoized) = self.memo.get(name) {
            return memoized.clone();
        }

        let (definition, origin) = match self.resolver.resolve_class(name) {
            ResolutionResult::Found { definition, origin } => (definition, origin),
            // Unresolved or malformed parents are leaves for their edge.
            ResolutionResult::NotFound | ResolutionResult::Invalid { .. } => {
                self.memo.insert(name.clone(), None);
                return None;
            }
        };

        path.insert(name.clone());

        let mut superclass = None;
        if let Some(parent) = &definition.superclass {
            if !path.contains(parent) {
                superclass = self.build_node(parent, path);
            }
        }

        let mut interfaces = Vec::new();
        for parent in &definition.interfaces {
            if path.contains(parent) {
                continue;
            }
            if let Some(node) = self.build_node(parent, path) {
                interfaces.push(node);
            }
        }

        path.remove(name);

        let node = Arc::new(ClassHierarchy {
            name: name.clone(),
            is_interface: definition.is_interface,
            in_target_api: (self.is_target_origin)(&origin),
            superclass,
            interfaces,
        });
        self.memo.insert(name.clone(), Some(Arc::clone(&node)));
        Some(node)
    }
}
