//! # veriplug-base
//!
//! Core library for verifying binary compatibility of plugin bytecode
//! against a host application's API surface across versions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! verification → task wiring: classpath assembly, super-type search, task runner
//!   ↓
//! plugin       → descriptor bean, plugin creation, optional-descriptor resolution
//!   ↓
//! dependency   → dependency resolution chain (bundled / download / repeating)
//!   ↓
//! hierarchy    → class ancestry graph + cycle-safe visitor
//!   ↓
//! resolver     → class lookup across composed class-path sources
//!   ↓
//! problems     → structured problem records
//!   ↓
//! classes      → structural class representation
//!   ↓
//! base         → primitives (ClassName, ClassOrigin, TargetVersion)
//! ```
//!
//! Three engines form the core: class resolution with class-path shadowing
//! ([`resolver`]), cycle-safe hierarchy traversal ([`hierarchy`]), and the
//! dependency resolution chain ([`dependency`]). Everything else consumes
//! them. Parsing of class files and plugin manifests belongs to external
//! collaborators; this crate starts from their parsed outputs.

/// Foundation types: ClassName, ClassOrigin, TargetVersion
pub mod base;

/// Structural class representation
pub mod classes;

/// Structured problem records
pub mod problems;

/// Class resolution across composed class-path sources
pub mod resolver;

/// Class ancestry graphs and traversal
pub mod hierarchy;

/// Dependency resolution chain
pub mod dependency;

/// Plugin descriptors and creation
pub mod plugin;

/// Task-level wiring for verification runs
pub mod verification;

// Re-export commonly needed items
pub use base::{ClassName, ClassOrigin, OriginKind, TargetVersion};
pub use classes::{ClassDefinition, Member, ReadMode};
pub use dependency::{Dependency, DependencyResolution, DependencyResolver};
pub use hierarchy::{ClassHierarchy, ClassHierarchyVisitor, HierarchyBuilder};
pub use problems::{Problem, ProblemCollector, Severity};
pub use resolver::{ClassResolver, ResolutionResult};
