//! End-to-end checks for optional dependency descriptor resolution.
//!
//! Optional dependency failures are warnings: the depending plugin is still
//! created, and the warning names both the dependency and the configuration
//! file that failed to resolve.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use veriplug::dependency::Dependency;
use veriplug::plugin::{
    DescriptorProvider, OptionalDependencyConfig, PluginCreationResult, PluginDescriptor,
    create_plugin,
};
use veriplug::problems::{ProblemKind, Severity};

struct ArchiveStub {
    configs: FxHashMap<SmolStr, PluginDescriptor>,
}

impl DescriptorProvider for ArchiveStub {
    fn descriptor(&self, config_file: &str) -> Option<PluginDescriptor> {
        self.configs.get(config_file).cloned()
    }
}

fn plugin_p_with_optional_q(q_descriptor: PluginDescriptor) -> (PluginDescriptor, ArchiveStub) {
    let mut p = PluginDescriptor::new("org.plugin.p", "Plugin P", "1.0");
    p.dependencies.push(Dependency::plugin("org.plugin.q").optional());
    p.optional_configs.push(OptionalDependencyConfig {
        dependency_id: "org.plugin.q".into(),
        config_file: "extra.xml".into(),
    });

    let mut configs = FxHashMap::default();
    configs.insert(SmolStr::new("extra.xml"), q_descriptor);
    (p, ArchiveStub { configs })
}

#[test]
fn test_invalid_optional_descriptor_is_a_warning_and_creation_succeeds() {
    // Q's descriptor in extra.xml is missing its name.
    let q = PluginDescriptor {
        id: Some("org.plugin.q".into()),
        name: None,
        version: Some("2.0".into()),
        ..Default::default()
    };
    let (p, archive) = plugin_p_with_optional_q(q);

    match create_plugin(&p, &archive) {
        PluginCreationResult::Success { plugin, warnings } => {
            assert_eq!(plugin.id, "org.plugin.p");
            // No optional plugin was attached for the failed descriptor.
            assert!(plugin.optional_plugins.is_empty());

            assert_eq!(warnings.len(), 1);
            let warning = &warnings[0];
            assert_eq!(warning.severity, Severity::Warning);
            assert!(warning.message.contains("org.plugin.q"));
            assert!(warning.message.contains("extra.xml"));
            assert!(warning.message.contains("name"));
            assert!(matches!(
                warning.kind,
                ProblemKind::OptionalDependencyDescriptorResolution { .. }
            ));
        }
        PluginCreationResult::Failure { problems } => {
            panic!("optional descriptor failures must not fail creation: {problems:?}")
        }
    }
}

#[test]
fn test_valid_optional_descriptor_is_attached() {
    let q = PluginDescriptor::new("org.plugin.q", "Plugin Q", "2.0");
    let (p, archive) = plugin_p_with_optional_q(q);

    match create_plugin(&p, &archive) {
        PluginCreationResult::Success { plugin, warnings } => {
            assert!(warnings.is_empty());
            assert_eq!(plugin.optional_plugins.len(), 1);
            let (config_file, optional) = &plugin.optional_plugins[0];
            assert_eq!(config_file, "extra.xml");
            assert_eq!(optional.id, "org.plugin.q");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_own_descriptor_errors_still_fail_creation() {
    let mut p = PluginDescriptor::new("org.plugin.p", "Plugin P", "1.0");
    p.version = None;

    match create_plugin(&p, &ArchiveStub { configs: FxHashMap::default() }) {
        PluginCreationResult::Failure { problems } => {
            assert!(problems.iter().any(|problem| matches!(
                &problem.kind,
                ProblemKind::InvalidDescriptor { property } if property == "version"
            )));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
