//! Version selection strategies over the plugin repository.

use crate::base::TargetVersion;
use crate::dependency::{PluginArtifact, RepositoryError};
use std::sync::Arc;
use tracing::warn;

/// The plugin repository collaborator.
///
/// Lookups answer with `Ok(None)` when the repository simply has no
/// matching build; `Err` is reserved for resource failures (network, I/O),
/// which selectors convert to [`SelectorResult::NotFound`] with the cause
/// preserved. One attempt per call, no internal retries.
pub trait PluginRepository: Send + Sync {
    /// The newest update of `plugin_id` compatible with `target`.
    fn last_compatible_update(
        &self,
        target: &TargetVersion,
        plugin_id: &str,
    ) -> Result<Option<Arc<PluginArtifact>>, RepositoryError>;

    /// The newest update of `plugin_id`, regardless of compatibility.
    fn last_update(
        &self,
        plugin_id: &str,
    ) -> Result<Option<Arc<PluginArtifact>>, RepositoryError>;
}

/// The outcome of selecting a version for a dependency id.
#[derive(Clone, Debug)]
pub enum SelectorResult {
    /// A concrete artifact was chosen.
    Selected(Arc<PluginArtifact>),
    /// No suitable artifact exists (or the repository was unreachable).
    NotFound(Arc<str>),
}

/// Chooses a concrete plugin artifact version for an abstract dependency id.
pub trait DependencySelector: Send + Sync {
    /// Select an artifact for `plugin_id`.
    fn select(&self, plugin_id: &str) -> SelectorResult;
}

/// Selects the last update of a plugin compatible with a given target
/// version.
pub struct LastCompatibleSelector {
    target: TargetVersion,
    repository: Arc<dyn PluginRepository>,
}

impl LastCompatibleSelector {
    pub fn new(target: TargetVersion, repository: Arc<dyn PluginRepository>) -> Self {
        Self { target, repository }
    }
}

impl DependencySelector for LastCompatibleSelector {
    fn select(&self, plugin_id: &str) -> SelectorResult {
        match self.repository.last_compatible_update(&self.target, plugin_id) {
            Ok(Some(artifact)) => SelectorResult::Selected(artifact),
            Ok(None) => SelectorResult::NotFound(
                format!(
                    "plugin {plugin_id} doesn't have a build compatible with {}",
                    self.target
                )
                .into(),
            ),
            Err(error) => {
                warn!(plugin = plugin_id, %error, "repository lookup failed");
                SelectorResult::NotFound(
                    format!("plugin {plugin_id} could not be looked up: {error}").into(),
                )
            }
        }
    }
}

/// Selects the newest available update of a plugin, ignoring compatibility.
///
/// Used at the tail of chains where first-party and module ids are allowed
/// to fall through to "download the newest available".
pub struct LastUpdateSelector {
    repository: Arc<dyn PluginRepository>,
}

impl LastUpdateSelector {
    pub fn new(repository: Arc<dyn PluginRepository>) -> Self {
        Self { repository }
    }
}

impl DependencySelector for LastUpdateSelector {
    fn select(&self, plugin_id: &str) -> SelectorResult {
        match self.repository.last_update(plugin_id) {
            Ok(Some(artifact)) => SelectorResult::Selected(artifact),
            Ok(None) => SelectorResult::NotFound(
                format!("plugin {plugin_id} has no updates in the repository").into(),
            ),
            Err(error) => {
                warn!(plugin = plugin_id, %error, "repository lookup failed");
                SelectorResult::NotFound(
                    format!("plugin {plugin_id} could not be looked up: {error}").into(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    /// In-memory repository: (plugin id, compatible target) -> artifact.
    pub(crate) struct StubRepository {
        pub compatible: FxHashMap<(String, String), Arc<PluginArtifact>>,
        pub latest: FxHashMap<String, Arc<PluginArtifact>>,
        pub fail_with: Option<String>,
    }

    impl StubRepository {
        pub fn empty() -> Self {
            Self {
                compatible: FxHashMap::default(),
                latest: FxHashMap::default(),
                fail_with: None,
            }
        }
    }

    impl PluginRepository for StubRepository {
        fn last_compatible_update(
            &self,
            target: &TargetVersion,
            plugin_id: &str,
        ) -> Result<Option<Arc<PluginArtifact>>, RepositoryError> {
            if let Some(message) = &self.fail_with {
                return Err(RepositoryError::Network(message.clone()));
            }
            let key = (plugin_id.to_owned(), target.as_str().to_owned());
            Ok(self.compatible.get(&key).cloned())
        }

        fn last_update(
            &self,
            plugin_id: &str,
        ) -> Result<Option<Arc<PluginArtifact>>, RepositoryError> {
            if let Some(message) = &self.fail_with {
                return Err(RepositoryError::Network(message.clone()));
            }
            Ok(self.latest.get(plugin_id).cloned())
        }
    }

    #[test]
    fn test_last_compatible_selects_matching_build() {
        let mut repository = StubRepository::empty();
        repository.compatible.insert(
            ("org.demo".into(), "251.1".into()),
            Arc::new(PluginArtifact::new("org.demo", "2.4")),
        );

        let selector =
            LastCompatibleSelector::new(TargetVersion::new("251.1"), Arc::new(repository));
        match selector.select("org.demo") {
            SelectorResult::Selected(artifact) => assert_eq!(artifact.version, "2.4"),
            other => panic!("expected selection, got {other:?}"),
        }
    }

    #[test]
    fn test_no_compatible_build_reason_names_plugin() {
        let selector = LastCompatibleSelector::new(
            TargetVersion::new("251.1"),
            Arc::new(StubRepository::empty()),
        );
        match selector.select("foo") {
            SelectorResult::NotFound(reason) => {
                assert!(reason.contains("foo"));
                assert!(reason.contains("251.1"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_repository_error_becomes_not_found() {
        let mut repository = StubRepository::empty();
        repository.fail_with = Some("connection refused".into());

        let selector = LastUpdateSelector::new(Arc::new(repository));
        match selector.select("org.demo") {
            SelectorResult::NotFound(reason) => {
                assert!(reason.contains("connection refused"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
