//! Provenance of resolved classes.

use smol_str::SmolStr;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a class definition came from.
///
/// An origin is an identity value with an optional parent, forming a
/// provenance chain: a class found inside an archive bundled with a plugin
/// has the archive as its origin and the plugin as that origin's parent.
///
/// Origins are metadata only. Downstream code compares them (or inspects
/// their chain) to attribute a resolved class to a source; they are never
/// used to drive resolution itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClassOrigin {
    kind: OriginKind,
    parent: Option<Arc<ClassOrigin>>,
}

/// The concrete source a [`ClassOrigin`] describes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OriginKind {
    /// A class archive (jar/zip) on disk.
    Archive(PathBuf),
    /// A directory of class files.
    Directory(PathBuf),
    /// Classes bundled with a plugin.
    PluginClasses { plugin_id: SmolStr },
    /// The API classes of a specific host application build.
    TargetApi { build: SmolStr },
    /// A caller-configured external classpath entry.
    External { label: SmolStr },
}

impl ClassOrigin {
    /// Create a root origin with no parent.
    pub fn new(kind: OriginKind) -> Self {
        Self { kind, parent: None }
    }

    /// Create an origin chained under a parent.
    pub fn child_of(parent: &ClassOrigin, kind: OriginKind) -> Self {
        Self {
            kind,
            parent: Some(Arc::new(parent.clone())),
        }
    }

    /// The source this origin describes.
    pub fn kind(&self) -> &OriginKind {
        &self.kind
    }

    /// The parent origin, if this origin is part of a chain.
    pub fn parent(&self) -> Option<&ClassOrigin> {
        self.parent.as_deref()
    }

    /// Walk the chain from this origin to the root.
    pub fn chain(&self) -> impl Iterator<Item = &ClassOrigin> {
        std::iter::successors(Some(self), |origin| origin.parent())
    }

    /// Whether this origin or any ancestor describes the target API.
    pub fn is_target_api(&self) -> bool {
        self.chain()
            .any(|o| matches!(o.kind, OriginKind::TargetApi { .. }))
    }
}

impl fmt::Debug for ClassOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{:?} <- {:?}", self.kind, parent),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl fmt::Display for ClassOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OriginKind::Archive(path) => write!(f, "archive {}", path.display()),
            OriginKind::Directory(path) => write!(f, "directory {}", path.display()),
            OriginKind::PluginClasses { plugin_id } => write!(f, "plugin {plugin_id}"),
            OriginKind::TargetApi { build } => write!(f, "target build {build}"),
            OriginKind::External { label } => write!(f, "external classpath {label}"),
        }
    }
}
