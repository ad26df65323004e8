//! Plugin descriptors and plugin creation.
//!
//! Descriptor parsing (XML/JSON manifest extraction) belongs to an external
//! collaborator; this module consumes the already-parsed
//! [`PluginDescriptor`] bean, validates it, and resolves the descriptors
//! referenced by optional-dependency configuration files.
//!
//! Optional dependency failures are warnings: a plugin whose optional
//! descriptor is missing or invalid is still created. A cycle among
//! optional-dependency configuration files is a defect of the plugin's
//! configuration and fails creation with a named problem.

use crate::dependency::Dependency;
use crate::problems::{Problem, Severity};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// An optional dependency's reference to the configuration file holding
/// the descriptor that applies when the dependency is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionalDependencyConfig {
    /// The depended-on plugin id.
    pub dependency_id: SmolStr,
    /// The configuration file name, e.g. `"extra.xml"`.
    pub config_file: SmolStr,
}

/// The parsed plugin manifest, as supplied by the metadata collaborator.
#[derive(Clone, Debug, Default)]
pub struct PluginDescriptor {
    pub id: Option<SmolStr>,
    pub name: Option<SmolStr>,
    pub version: Option<SmolStr>,
    /// Declared dependencies, with optional/module flags.
    pub dependencies: Vec<Dependency>,
    /// Optional-dependency configuration file references.
    pub optional_configs: Vec<OptionalDependencyConfig>,
}

impl PluginDescriptor {
    /// A descriptor with the three required properties set.
    pub fn new(
        id: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        version: impl Into<SmolStr>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Supplies the descriptor stored in an optional-dependency configuration
/// file. Backed by the plugin archive; `None` when the file is absent.
pub trait DescriptorProvider {
    fn descriptor(&self, config_file: &str) -> Option<PluginDescriptor>;
}

/// A successfully created plugin.
#[derive(Clone, Debug)]
pub struct Plugin {
    pub id: SmolStr,
    pub name: SmolStr,
    pub version: SmolStr,
    /// Declared dependencies, optional ones included.
    pub dependencies: Vec<Dependency>,
    /// Plugins created from resolved optional descriptors, keyed by the
    /// configuration file that declared them.
    pub optional_plugins: Vec<(SmolStr, Plugin)>,
}

/// The outcome of creating a plugin from its descriptor.
#[derive(Clone, Debug)]
pub enum PluginCreationResult {
    /// The plugin was created; `warnings` carries non-fatal problems
    /// (absent or invalid optional descriptors).
    Success { plugin: Plugin, warnings: Vec<Problem> },
    /// The descriptor is invalid.
    Failure { problems: Vec<Problem> },
}

impl PluginCreationResult {
    /// Construct a failure.
    ///
    /// Calling this without at least one error-severity problem is a
    /// programmer error, not a runtime condition, and fails fast.
    pub fn failure(problems: Vec<Problem>) -> Self {
        assert!(
            problems.iter().any(|p| p.severity == Severity::Error),
            "an invalid plugin must be justified by at least one error-severity problem"
        );
        Self::Failure { problems }
    }

    /// The created plugin, if creation succeeded.
    pub fn plugin(&self) -> Option<&Plugin> {
        match self {
            Self::Success { plugin, .. } => Some(plugin),
            Self::Failure { .. } => None,
        }
    }

    /// Whether creation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Create a plugin from its descriptor, resolving optional-dependency
/// descriptors through `provider`.
pub fn create_plugin(
    descriptor: &PluginDescriptor,
    provider: &dyn DescriptorProvider,
) -> PluginCreationResult {
    let mut active_configs = FxHashSet::default();
    create_plugin_inner(descriptor, provider, &mut active_configs, &mut Vec::new())
}

fn create_plugin_inner(
    descriptor: &PluginDescriptor,
    provider: &dyn DescriptorProvider,
    active_configs: &mut FxHashSet<SmolStr>,
    config_path: &mut Vec<SmolStr>,
) -> PluginCreationResult {
    let mut problems = Vec::new();
    validate_required(descriptor, &mut problems);
    if !problems.is_empty() {
        return PluginCreationResult::failure(problems);
    }

    // Required properties are present past validation.
    let id = descriptor.id.clone().unwrap_or_default();
    let name = descriptor.name.clone().unwrap_or_default();
    let version = descriptor.version.clone().unwrap_or_default();

    let mut warnings = Vec::new();
    let mut optional_plugins = Vec::new();

    for config in &descriptor.optional_configs {
        if active_configs.contains(&config.config_file) {
            let mut cycle = config_path.clone();
            cycle.push(config.config_file.clone());
            problems.push(Problem::cyclic_optional_configuration(cycle));
            continue;
        }

        let Some(nested_descriptor) = provider.descriptor(&config.config_file) else {
            warnings.push(Problem::optional_descriptor_resolution(
                config.dependency_id.clone(),
                config.config_file.clone(),
                "configuration file is absent from the plugin",
            ));
            continue;
        };

        active_configs.insert(config.config_file.clone());
        config_path.push(config.config_file.clone());
        let nested =
            create_plugin_inner(&nested_descriptor, provider, active_configs, config_path);
        config_path.pop();
        active_configs.remove(&config.config_file);

        match nested {
            PluginCreationResult::Success { plugin, warnings: nested_warnings } => {
                warnings.extend(nested_warnings);
                optional_plugins.push((config.config_file.clone(), plugin));
            }
            PluginCreationResult::Failure { problems: nested_problems } => {
                // A cycle detected below is a configuration defect of this
                // plugin; anything else stays a warning.
                let (cycles, validation): (Vec<_>, Vec<_>) =
                    nested_problems.into_iter().partition(|p| {
                        matches!(
                            p.kind,
                            crate::problems::ProblemKind::CyclicOptionalDependencyConfiguration { .. }
                        )
                    });
                problems.extend(cycles);

                let reason = validation
                    .first()
                    .map(|p| p.message.to_string())
                    .unwrap_or_else(|| "descriptor failed validation".to_owned());
                if !validation.is_empty() {
                    warnings.push(Problem::optional_descriptor_resolution(
                        config.dependency_id.clone(),
                        config.config_file.clone(),
                        &reason,
                    ));
                }
            }
        }
    }

    if !problems.is_empty() {
        return PluginCreationResult::failure(problems);
    }

    PluginCreationResult::Success {
        plugin: Plugin {
            id,
            name,
            version,
            dependencies: descriptor.dependencies.clone(),
            optional_plugins,
        },
        warnings,
    }
}

fn validate_required(descriptor: &PluginDescriptor, problems: &mut Vec<Problem>) {
    if descriptor.id.as_deref().is_none_or(str::is_empty) {
        problems.push(Problem::missing_property("id"));
    }
    if descriptor.name.as_deref().is_none_or(str::is_empty) {
        problems.push(Problem::missing_property("name"));
    }
    if descriptor.version.as_deref().is_none_or(str::is_empty) {
        problems.push(Problem::missing_property("version"));
    }
}
