//! Class resolution — looking up class definitions across composed sources.
//!
//! A [`ClassResolver`] maps a fully-qualified [`ClassName`] to a
//! [`ResolutionResult`]. Resolvers compose by plain object composition:
//!
//! - [`FixedResolver`] - exhaustive in-memory map built once
//! - [`CacheResolver`] - memoizes a delegate's answers (negative ones too)
//! - [`CompositeResolver`] - ordered children, first match wins
//! - [`EmptyResolver`] - knows nothing, safe default
//!
//! The central invariant is class-path shadowing: for an ordered list of
//! sources, the first source that knows a name answers for it. Composition
//! of composites behaves identically to a single flattened composite with
//! the same effective order.
//!
//! Resolvers are read-mostly structures shared across concurrently running
//! verification tasks. [`FixedResolver`], [`CompositeResolver`] and
//! [`EmptyResolver`] are immutable after construction; [`CacheResolver`]'s
//! memo table is the only internal mutable state. Backing resources are
//! released when a resolver is dropped; wrapping resolvers hold `Arc`s and
//! never own their children's resources.

mod cache;
mod composite;
mod empty;
mod fixed;

pub use cache::CacheResolver;
pub use composite::CompositeResolver;
pub use empty::EmptyResolver;
pub use fixed::FixedResolver;

use crate::base::{ClassName, ClassOrigin};
use crate::classes::ClassDefinition;
use indexmap::IndexSet;
use smol_str::SmolStr;
use std::sync::Arc;

/// The outcome of resolving a class name.
///
/// `NotFound` is a first-class value, distinct from an error: a missing
/// class is data the verifier reports on, not a failure. `Invalid` marks a
/// name a source claims but could not parse into a definition.
#[derive(Clone, Debug)]
pub enum ResolutionResult {
    /// The class was found; `origin` identifies which source supplied it.
    Found {
        definition: Arc<ClassDefinition>,
        origin: ClassOrigin,
    },
    /// No source knows this name.
    NotFound,
    /// A source claims this name but its entry is malformed.
    Invalid { reason: Arc<str> },
}

impl ResolutionResult {
    /// Create an `Invalid` result with a reason.
    pub fn invalid(reason: impl Into<Arc<str>>) -> Self {
        Self::Invalid { reason: reason.into() }
    }

    /// The resolved definition, if found.
    pub fn definition(&self) -> Option<&Arc<ClassDefinition>> {
        match self {
            Self::Found { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// The origin of the resolved definition, if found.
    pub fn origin(&self) -> Option<&ClassOrigin> {
        match self {
            Self::Found { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// Whether resolution succeeded.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Whether no source knows the name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// The sole class-lookup abstraction exposed to verification tasks.
///
/// Tasks never touch archive or file I/O directly; whatever source backs an
/// implementation, lookups answer with [`ResolutionResult`] values and
/// resource failures are converted to results at the resolver boundary.
pub trait ClassResolver: Send + Sync {
    /// Resolve a fully-qualified class name.
    ///
    /// Never panics and never returns a raw error; absence is `NotFound`,
    /// malformed entries are `Invalid`.
    fn resolve_class(&self, name: &ClassName) -> ResolutionResult;

    /// All class names this resolver knows.
    fn all_classes(&self) -> IndexSet<ClassName>;

    /// All packages this resolver knows, including every proper prefix of
    /// every class name.
    fn all_packages(&self) -> IndexSet<SmolStr>;

    /// Whether this resolver knows the given class name.
    fn contains_class(&self, name: &ClassName) -> bool;

    /// Whether this resolver knows the given package.
    fn contains_package(&self, package: &str) -> bool;
}

impl<R: ClassResolver + ?Sized> ClassResolver for Arc<R> {
    fn resolve_class(&self, name: &ClassName) -> ResolutionResult {
        (**self).resolve_class(name)
    }

    fn all_classes(&self) -> IndexSet<ClassName> {
        (**self).all_classes()
    }

    fn all_packages(&self) -> IndexSet<SmolStr> {
        (**self).all_packages()
    }

    fn contains_class(&self, name: &ClassName) -> bool {
        (**self).contains_class(name)
    }

    fn contains_package(&self, package: &str) -> bool {
        (**self).contains_package(package)
    }
}
