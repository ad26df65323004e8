//! Resolution against the plugins bundled with a target build.

use crate::base::TargetVersion;
use crate::dependency::{Dependency, DependencyResolution, DependencyResolver, PluginArtifact};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;

/// Looks dependencies up against a fixed, pre-indexed set of plugins and
/// modules bundled with a specific application build.
///
/// No network access and no caching: the backing index is already a map.
pub struct BundledResolver {
    build: TargetVersion,
    plugins: FxHashMap<SmolStr, Arc<PluginArtifact>>,
    modules: FxHashMap<SmolStr, Arc<PluginArtifact>>,
}

impl BundledResolver {
    /// Build the index for one target build.
    ///
    /// `modules` maps module ids to the bundled plugin that declares them.
    pub fn new(
        build: TargetVersion,
        plugins: Vec<Arc<PluginArtifact>>,
        modules: Vec<(SmolStr, Arc<PluginArtifact>)>,
    ) -> Self {
        Self {
            build,
            plugins: plugins
                .into_iter()
                .map(|artifact| (artifact.id.clone(), artifact))
                .collect(),
            modules: modules.into_iter().collect(),
        }
    }

    /// The build this index belongs to.
    pub fn build(&self) -> &TargetVersion {
        &self.build
    }
}

impl DependencyResolver for BundledResolver {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        let index = if dependency.is_module { &self.modules } else { &self.plugins };
        match index.get(&dependency.id) {
            Some(artifact) => DependencyResolution::Found(Arc::clone(artifact)),
            None => DependencyResolution::not_found(format!(
                "{dependency} is not bundled with {}",
                self.build
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> BundledResolver {
        let platform = Arc::new(PluginArtifact::new("com.host.platform", "251.1"));
        BundledResolver::new(
            TargetVersion::new("251.1"),
            vec![Arc::new(PluginArtifact::new("org.bundled", "3.0"))],
            vec![(SmolStr::new("com.host.json"), platform)],
        )
    }

    #[test]
    fn test_bundled_plugin_found() {
        let result = resolver().resolve(&Dependency::plugin("org.bundled"));
        assert_eq!(result.artifact().unwrap().version, "3.0");
    }

    #[test]
    fn test_module_index_is_separate() {
        let resolver = resolver();

        let module = resolver.resolve(&Dependency::module("com.host.json"));
        assert_eq!(module.artifact().unwrap().id, "com.host.platform");

        // The same id looked up as a plugin misses.
        assert!(resolver.resolve(&Dependency::plugin("com.host.json")).is_not_found());
    }

    #[test]
    fn test_missing_names_build_in_reason() {
        let result = resolver().resolve(&Dependency::plugin("org.absent"));
        match result {
            DependencyResolution::NotFound { reason } => {
                assert!(reason.contains("org.absent"));
                assert!(reason.contains("251.1"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
