//! Task-level wiring for verification runs.
//!
//! One verification task covers one (plugin, target-version) pair: it
//! resolves the plugin's dependencies transitively, assembles the composed
//! classpath, and runs hierarchy-aware checks against it. Tasks are
//! independent and run over a worker pool with no ordering guarantee.

use crate::base::{ClassName, TargetVersion};
use crate::dependency::{Dependency, DependencyResolution, DependencyResolver, PluginArtifact};
use crate::hierarchy::{ClassHierarchy, ClassHierarchyVisitor};
use crate::plugin::Plugin;
use crate::problems::Problem;
use crate::resolver::{CacheResolver, ClassResolver, CompositeResolver};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Assemble the classpath for one verification task.
///
/// Order matters and encodes shadowing: the plugin's own classes win over
/// the target API classes, which win over the external classpath. Each
/// layer is cache-wrapped so repeated lookups during a task stay cheap;
/// the caches are discarded with the returned resolver.
pub fn build_classpath(
    plugin_classes: Arc<dyn ClassResolver>,
    target_api_classes: Arc<dyn ClassResolver>,
    external_classpath: Arc<dyn ClassResolver>,
) -> CompositeResolver {
    CompositeResolver::new(vec![
        Arc::new(CacheResolver::new(plugin_classes)),
        Arc::new(CacheResolver::new(target_api_classes)),
        Arc::new(CacheResolver::new(external_classpath)),
    ])
}

/// The ancestors of a class that belong to the target application's API,
/// split by kind. Sorted for stable display in problem messages.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TargetSuperTypes {
    pub classes: BTreeSet<ClassName>,
    pub interfaces: BTreeSet<ClassName>,
}

/// Collect every ancestor of `hierarchy` flagged as belonging to the
/// target API. The root itself is not included.
pub fn find_target_super_types(hierarchy: &ClassHierarchy) -> TargetSuperTypes {
    let mut result = TargetSuperTypes::default();
    ClassHierarchyVisitor::new(true).visit_class_hierarchy(hierarchy, false, |parent| {
        if parent.in_target_api {
            if parent.is_interface {
                result.interfaces.insert(parent.name.clone());
            } else {
                result.classes.insert(parent.name.clone());
            }
        }
        true
    });
    result
}

/// Render the "might have been declared in a super type belonging to the
/// target application" clause of a problem message.
///
/// Returns the empty string when no candidate super type exists.
pub fn describe_declaration_in_target_super_types(
    element_type: &str,
    hierarchy: &ClassHierarchy,
    target: &TargetVersion,
    can_be_in_super_class: bool,
    can_be_in_super_interface: bool,
) -> String {
    let super_types = find_target_super_types(hierarchy);
    let none = BTreeSet::new();
    let classes = if can_be_in_super_class { &super_types.classes } else { &none };
    let interfaces = if can_be_in_super_interface { &super_types.interfaces } else { &none };

    if classes.is_empty() && interfaces.is_empty() {
        return String::new();
    }

    let mut message = format!(" The {element_type} might have been declared ");
    if !classes.is_empty() {
        message.push_str(&format!(
            "in the super {} belonging to {target} ({})",
            pluralize("class", "classes", classes.len()),
            join_source_names(classes),
        ));
    }
    if !interfaces.is_empty() {
        if !classes.is_empty() {
            message.push_str(" or ");
        }
        message.push_str(&format!(
            "in the super {} belonging to {target} ({})",
            pluralize("interface", "interfaces", interfaces.len()),
            join_source_names(interfaces),
        ));
    }
    message
}

fn pluralize<'a>(singular: &'a str, plural: &'a str, count: usize) -> &'a str {
    if count == 1 { singular } else { plural }
}

fn join_source_names(names: &BTreeSet<ClassName>) -> String {
    names
        .iter()
        .map(ClassName::to_source_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The artifacts and problems produced by a transitive dependency walk.
#[derive(Debug, Default)]
pub struct DependencyReport {
    /// Artifacts of every resolved dependency, in discovery order.
    pub artifacts: Vec<Arc<PluginArtifact>>,
    /// Per-dependency problems: errors for mandatory misses, warnings for
    /// optional ones.
    pub problems: Vec<Problem>,
}

/// Resolve a plugin's dependencies transitively.
///
/// `dependencies_of` supplies the declared dependencies of a resolved
/// artifact (plugin metadata collaborator). Each dependency is resolved at
/// most once per walk; sharing a [`crate::dependency::RepeatingResolver`]
/// across tasks extends that to the whole run.
pub fn resolve_dependencies_transitively(
    plugin: &Plugin,
    resolver: &dyn DependencyResolver,
    dependencies_of: impl Fn(&PluginArtifact) -> Vec<Dependency>,
) -> DependencyReport {
    let mut report = DependencyReport::default();
    let mut visited: FxHashSet<Dependency> = FxHashSet::default();
    let mut queue: VecDeque<Dependency> = plugin.dependencies.iter().cloned().collect();

    while let Some(dependency) = queue.pop_front() {
        if !visited.insert(dependency.clone()) {
            continue;
        }

        match resolver.resolve(&dependency) {
            DependencyResolution::Found(artifact) => {
                debug!(%dependency, %artifact, "dependency resolved");
                queue.extend(dependencies_of(&artifact));
                report.artifacts.push(artifact);
            }
            DependencyResolution::NotFound { reason } => {
                let problem = if dependency.is_optional {
                    Problem::optional_dependency_absent(dependency.id.clone(), &reason)
                } else {
                    Problem::dependency_not_found(dependency.id.clone(), &reason)
                };
                report.problems.push(problem);
            }
            DependencyResolution::CycleDetected { path } => {
                report.problems.push(Problem::dependency_cycle(path));
            }
        }
    }

    report
}

/// Run independent verification tasks over the rayon worker pool.
///
/// No ordering guarantee between tasks; results come back in task order.
pub fn run_tasks<T, R, F>(tasks: &[T], run: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    tasks.par_iter().map(run).collect()
}
