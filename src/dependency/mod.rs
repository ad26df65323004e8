//! Dependency resolution — mapping plugin dependency identifiers to
//! concrete artifacts.
//!
//! Strategies compose via delegation rather than inheritance:
//!
//! - [`BundledResolver`] - fixed index of plugins/modules shipped with a
//!   target build
//! - [`DownloadResolver`] - selector-driven repository lookup plus fetch
//! - [`RepeatingResolver`] - memoizes a delegate so repeated resolution of
//!   one dependency across many verification tasks costs one round-trip
//! - [`FallbackResolver`] / [`FilteredResolver`] - chain order encodes
//!   precedence policy as data
//!
//! `NotFound` is a normal, expected outcome (optional dependency, plugin
//! genuinely absent from the repository) and never unwinds as an error: it
//! is reported upward as a per-dependency problem.

mod bundled;
mod chain;
mod download;
mod repeating;
mod selector;

pub use bundled::BundledResolver;
pub use chain::{FallbackResolver, FilteredResolver};
pub use download::{ArtifactFetcher, DownloadResolver};
pub use repeating::RepeatingResolver;
pub use selector::{
    DependencySelector, LastCompatibleSelector, LastUpdateSelector, PluginRepository,
    SelectorResult,
};

use smol_str::SmolStr;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// A declared plugin dependency.
///
/// Equality and hashing cover all three fields; the triple is the cache key
/// used by [`RepeatingResolver`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    /// The depended-on plugin or module identifier.
    pub id: SmolStr,
    /// Optional dependencies missing from the repository are warnings, not
    /// verification failures.
    pub is_optional: bool,
    /// Whether `id` names a module rather than a full plugin.
    pub is_module: bool,
}

impl Dependency {
    /// A mandatory plugin dependency.
    pub fn plugin(id: impl Into<SmolStr>) -> Self {
        Self { id: id.into(), is_optional: false, is_module: false }
    }

    /// A module dependency.
    pub fn module(id: impl Into<SmolStr>) -> Self {
        Self { id: id.into(), is_optional: false, is_module: true }
    }

    /// Mark this dependency optional.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_module {
            write!(f, "module {}", self.id)
        } else {
            write!(f, "plugin {}", self.id)
        }
    }
}

/// A concrete plugin artifact a dependency resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginArtifact {
    /// The plugin identifier.
    pub id: SmolStr,
    /// The artifact version string.
    pub version: SmolStr,
    /// Local file the artifact was fetched to, if it has been materialized.
    pub file: Option<PathBuf>,
}

impl PluginArtifact {
    /// Describe an artifact that has not been fetched yet.
    pub fn new(id: impl Into<SmolStr>, version: impl Into<SmolStr>) -> Self {
        Self { id: id.into(), version: version.into(), file: None }
    }
}

impl fmt::Display for PluginArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

/// The outcome of resolving one dependency.
#[derive(Clone, Debug)]
pub enum DependencyResolution {
    /// Resolved to a concrete artifact.
    Found(Arc<PluginArtifact>),
    /// The dependency could not be resolved; the reason is diagnostic text
    /// for the per-dependency problem record.
    NotFound { reason: Arc<str> },
    /// Resolution ran into a dependency cycle; `path` names the ids on it.
    CycleDetected { path: Vec<SmolStr> },
}

impl DependencyResolution {
    /// Create a `NotFound` with a reason.
    pub fn not_found(reason: impl Into<Arc<str>>) -> Self {
        Self::NotFound { reason: reason.into() }
    }

    /// The resolved artifact, if any.
    pub fn artifact(&self) -> Option<&Arc<PluginArtifact>> {
        match self {
            Self::Found(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// Whether the dependency resolved.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether the dependency is unresolvable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Resolves a dependency identifier to a concrete artifact.
///
/// Implementations return [`DependencyResolution`] values, never errors:
/// one unreachable repository must not abort a verification run covering
/// many plugins. A single attempt is the contract; retry policy belongs to
/// the caller.
pub trait DependencyResolver: Send + Sync {
    /// Resolve one dependency.
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution;
}

impl<R: DependencyResolver + ?Sized> DependencyResolver for Arc<R> {
    fn resolve(&self, dependency: &Dependency) -> DependencyResolution {
        (**self).resolve(dependency)
    }
}

/// A failure at the plugin repository boundary.
///
/// Repository collaborators surface these; resolvers convert them into
/// [`DependencyResolution::NotFound`] with the cause preserved as text.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The repository could not be reached.
    #[error("repository unreachable: {0}")]
    Network(String),
    /// A fetched artifact could not be stored locally.
    #[error("failed to store artifact: {0}")]
    Io(#[from] std::io::Error),
    /// The repository answered with something unusable.
    #[error("malformed repository response: {0}")]
    MalformedResponse(String),
}
