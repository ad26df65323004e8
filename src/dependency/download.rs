//! Repository-backed dependency resolution.

use crate::dependency::{
    Dependency, DependencyResolution, DependencyResolver, DependencySelector, PluginArtifact,
    RepositoryError, SelectorResult,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Materializes a selected artifact to a local file.
///
/// Network and I/O failures surface as [`RepositoryError`]; the resolver
/// converts them to `NotFound` with the cause in the reason. A single
/// attempt per resolution is the contract, retry policy belongs to callers.
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch `artifact`, returning the local file it was stored at.
    fn fetch(&self, artifact: &PluginArtifact) -> Result<PathBuf, RepositoryError>;
}

/// Resolves a dependency by delegating id-to-version selection to a
/// [`DependencySelector`] and then fetching the chosen artifact.
///
/// Every failure mode is a [`DependencyResolution::NotFound`] with a
/// descriptive reason; a missing plugin or an unreachable repository must
/// not abort the verification run requesting it.
pub struct DownloadResolver {
    selector: Arc<dyn DependencySelector>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl DownloadResolver {
    pub fn new(selector: Arc<dyn DependencySelector>, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self { selector, fetcher }
    }
}

impl DependencyResolver for DownloadResolver {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        let artifact = match self.selector.select(&dependency.id) {
            SelectorResult::Selected(artifact) => artifact,
            SelectorResult::NotFound(reason) => {
                debug!(%dependency, %reason, "selector found no artifact");
                return DependencyResolution::NotFound { reason };
            }
        };

        match self.fetcher.fetch(&artifact) {
            Ok(file) => {
                debug!(%dependency, %artifact, "dependency downloaded");
                DependencyResolution::Found(Arc::new(PluginArtifact {
                    file: Some(file),
                    ..(*artifact).clone()
                }))
            }
            Err(error) => {
                warn!(%dependency, %artifact, %error, "artifact fetch failed");
                DependencyResolution::not_found(format!(
                    "{dependency} selected {artifact} but it could not be fetched: {error}"
                ))
            }
        }
    }
}
