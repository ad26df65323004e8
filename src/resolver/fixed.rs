//! A resolver backed by a fixed, exhaustive set of class definitions.

use crate::base::{ClassName, ClassOrigin};
use crate::classes::{ClassDefinition, ReadMode};
use crate::resolver::{ClassResolver, ResolutionResult};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;

/// A [`ClassResolver`] built once from a known set of classes.
///
/// Lookup is an exact map lookup; misses return
/// [`ResolutionResult::NotFound`], never an error. The package set is
/// derived at construction by decomposing every class name on `/`, so
/// `"some/package/Foo"` contributes both `"some"` and `"some/package"`.
///
/// Immutable after construction; requires no synchronization.
pub struct FixedResolver {
    classes: FxHashMap<ClassName, (Arc<ClassDefinition>, ClassOrigin)>,
    class_names: IndexSet<ClassName>,
    packages: IndexSet<SmolStr>,
}

impl FixedResolver {
    /// Build from definitions sharing a single origin.
    pub fn new(
        definitions: Vec<ClassDefinition>,
        origin: ClassOrigin,
        read_mode: ReadMode,
    ) -> Self {
        let with_origins = definitions
            .into_iter()
            .map(|def| (def, origin.clone()))
            .collect();
        Self::with_origins(with_origins, read_mode)
    }

    /// Build from definitions carrying an origin each.
    pub fn with_origins(
        definitions: Vec<(ClassDefinition, ClassOrigin)>,
        read_mode: ReadMode,
    ) -> Self {
        let mut classes = FxHashMap::default();
        let mut class_names = IndexSet::new();
        let mut packages = IndexSet::new();

        for (definition, origin) in definitions {
            let definition = definition.in_read_mode(read_mode);
            let name = definition.name.clone();

            packages.insert(SmolStr::new(name.package()));
            for prefix in name.package_prefixes() {
                packages.insert(SmolStr::new(prefix));
            }

            class_names.insert(name.clone());
            classes.insert(name, (Arc::new(definition), origin));
        }

        Self { classes, class_names, packages }
    }

    /// Number of classes in this resolver.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether this resolver holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassResolver for FixedResolver {
    fn resolve_class(&self, name: &ClassName) -> ResolutionResult {
        match self.classes.get(name) {
            Some((definition, origin)) => ResolutionResult::Found {
                definition: Arc::clone(definition),
                origin: origin.clone(),
            },
            None => ResolutionResult::NotFound,
        }
    }

    fn all_classes(&self) -> IndexSet<ClassName> {
        self.class_names.clone()
    }

    fn all_packages(&self) -> IndexSet<SmolStr> {
        self.packages.clone()
    }

    fn contains_class(&self, name: &ClassName) -> bool {
        self.classes.contains_key(name)
    }

    fn contains_package(&self, package: &str) -> bool {
        self.packages.contains(package)
    }
}
