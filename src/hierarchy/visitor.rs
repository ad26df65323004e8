//! Depth-first traversal over class hierarchies.

use crate::base::ClassName;
use crate::hierarchy::ClassHierarchy;
use rustc_hash::FxHashSet;

/// Walks a [`ClassHierarchy`] depth-first, invoking a callback on entry to
/// each node.
///
/// Traversal order is deterministic: the superclass edge is visited before
/// the interface edges, interfaces in declaration order. Callers that
/// display super types in a different order must sort on their side.
///
/// The callback returning `false` prunes the subtree rooted at that node;
/// traversal continues across siblings. A class name already present on the
/// current root-to-node path is never re-entered, so malformed cyclic
/// hierarchies (hand-built graphs included) cannot hang or overflow the
/// traversal.
///
/// Traversal is single-threaded per call, but multiple calls may run
/// concurrently over one shared, immutable hierarchy graph.
pub struct ClassHierarchyVisitor {
    visit_interfaces: bool,
}

impl ClassHierarchyVisitor {
    /// Create a visitor; `visit_interfaces` controls whether interface
    /// edges are followed at all.
    pub fn new(visit_interfaces: bool) -> Self {
        Self { visit_interfaces }
    }

    /// Visit the hierarchy rooted at `root`.
    ///
    /// `visit_self` controls whether the root itself is passed to
    /// `on_enter` before its parents.
    pub fn visit_class_hierarchy(
        &self,
        root: &ClassHierarchy,
        visit_self: bool,
        mut on_enter: impl FnMut(&ClassHierarchy) -> bool,
    ) {
        let mut path = FxHashSet::default();
        if visit_self {
            self.visit_node(root, &mut path, &mut on_enter);
        } else {
            path.insert(root.name.clone());
            self.visit_parents(root, &mut path, &mut on_enter);
            path.remove(&root.name);
        }
    }

    fn visit_node(
        &self,
        node: &ClassHierarchy,
        path: &mut FxHashSet<ClassName>,
        on_enter: &mut impl FnMut(&ClassHierarchy) -> bool,
    ) {
        // Cycle guard: skip a name already on the active path.
        if path.contains(&node.name) {
            return;
        }
        if !on_enter(node) {
            // Pruned: siblings continue, this subtree does not.
            return;
        }

        path.insert(node.name.clone());
        self.visit_parents(node, path, on_enter);
        path.remove(&node.name);
    }

    fn visit_parents(
        &self,
        node: &ClassHierarchy,
        path: &mut FxHashSet<ClassName>,
        on_enter: &mut impl FnMut(&ClassHierarchy) -> bool,
    ) {
        if let Some(superclass) = &node.superclass {
            self.visit_node(superclass, path, on_enter);
        }
        if self.visit_interfaces {
            for interface in &node.interfaces {
                self.visit_node(interface, path, on_enter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn node(
        name: &str,
        superclass: Option<Arc<ClassHierarchy>>,
        interfaces: Vec<Arc<ClassHierarchy>>,
    ) -> Arc<ClassHierarchy> {
        Arc::new(ClassHierarchy {
            name: ClassName::new(name),
            is_interface: false,
            in_target_api: false,
            superclass,
            interfaces,
        })
    }

    /// D extends B, implements C; B and C both have A as parent.
    fn diamond() -> Arc<ClassHierarchy> {
        let a = node("demo/A", None, vec![]);
        let b = node("demo/B", Some(Arc::clone(&a)), vec![]);
        let c = node("demo/C", None, vec![Arc::clone(&a)]);
        node("demo/D", Some(b), vec![c])
    }

    fn collect_names(
        visitor: &ClassHierarchyVisitor,
        root: &ClassHierarchy,
        visit_self: bool,
    ) -> Vec<String> {
        let mut names = Vec::new();
        visitor.visit_class_hierarchy(root, visit_self, |n| {
            names.push(n.name.as_str().to_owned());
            true
        });
        names
    }

    #[test]
    fn test_superclass_before_interfaces() {
        let names = collect_names(&ClassHierarchyVisitor::new(true), &diamond(), true);
        assert_eq!(names, vec!["demo/D", "demo/B", "demo/A", "demo/C", "demo/A"]);
    }

    #[test]
    fn test_visit_self_false_skips_root() {
        let names = collect_names(&ClassHierarchyVisitor::new(true), &diamond(), false);
        assert_eq!(names[0], "demo/B");
        assert!(!names.contains(&"demo/D".to_owned()));
    }

    #[test]
    fn test_interfaces_skipped_when_disabled() {
        let names = collect_names(&ClassHierarchyVisitor::new(false), &diamond(), true);
        assert_eq!(names, vec!["demo/D", "demo/B", "demo/A"]);
    }

    #[test]
    fn test_prune_stops_subtree_but_not_siblings() {
        let root = diamond();
        let mut names = Vec::new();
        ClassHierarchyVisitor::new(true).visit_class_hierarchy(&root, true, |n| {
            names.push(n.name.as_str().to_owned());
            // Prune below B: A must not be reached through it.
            n.name.as_str() != "demo/B"
        });
        assert_eq!(names, vec!["demo/D", "demo/B", "demo/C", "demo/A"]);
    }

    #[test]
    fn test_hand_built_cycle_terminates() {
        // A graph a builder would never produce: D's ancestor A lists a
        // node with D's own name as its parent.
        let fake_d = node("demo/D", None, vec![]);
        let a = node("demo/A", Some(fake_d), vec![]);
        let b = node("demo/B", Some(a), vec![]);
        let d = node("demo/D", Some(b), vec![]);

        let names = collect_names(&ClassHierarchyVisitor::new(true), &d, true);
        // The inner demo/D is on the active path and must not be re-entered.
        assert_eq!(names, vec!["demo/D", "demo/B", "demo/A"]);
    }
}
