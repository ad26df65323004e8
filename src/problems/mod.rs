//! Structured problem records.
//!
//! Every absence or failure a verification task encounters becomes a
//! [`Problem`]: a kind, a human-readable message and a severity, aggregated
//! per task. No raw error text reaches the end report.

use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

/// Severity level of a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// What category of problem a record describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    /// The plugin descriptor is missing a required property.
    InvalidDescriptor { property: SmolStr },
    /// A mandatory dependency could not be resolved.
    DependencyNotFound { dependency_id: SmolStr },
    /// An optional dependency was declared but is absent or unresolvable.
    OptionalDependencyAbsent { dependency_id: SmolStr },
    /// The descriptor referenced by an optional dependency's config file
    /// could not be resolved or failed validation.
    OptionalDependencyDescriptorResolution {
        dependency_id: SmolStr,
        config_file: SmolStr,
    },
    /// Optional-dependency configuration files form a cycle.
    CyclicOptionalDependencyConfiguration { cycle: Vec<SmolStr> },
    /// Plugin dependencies form a cycle.
    DependencyCycle { cycle: Vec<SmolStr> },
    /// A class referenced during verification is absent from the classpath.
    ClassNotFound { class: SmolStr },
}

/// One problem found while verifying a plugin against a target build.
#[derive(Clone, Debug)]
pub struct Problem {
    pub kind: ProblemKind,
    pub message: Arc<str>,
    pub severity: Severity,
}

impl Problem {
    /// A required descriptor property is missing.
    pub fn missing_property(property: impl Into<SmolStr>) -> Self {
        let property = property.into();
        Self {
            message: format!("the plugin descriptor is missing required property '{property}'")
                .into(),
            kind: ProblemKind::InvalidDescriptor { property },
            severity: Severity::Error,
        }
    }

    /// A mandatory dependency did not resolve.
    pub fn dependency_not_found(dependency_id: impl Into<SmolStr>, reason: &str) -> Self {
        let dependency_id = dependency_id.into();
        Self {
            message: format!("dependency {dependency_id} could not be resolved: {reason}").into(),
            kind: ProblemKind::DependencyNotFound { dependency_id },
            severity: Severity::Error,
        }
    }

    /// An optional dependency did not resolve; verification proceeds.
    pub fn optional_dependency_absent(dependency_id: impl Into<SmolStr>, reason: &str) -> Self {
        let dependency_id = dependency_id.into();
        Self {
            message: format!(
                "optional dependency {dependency_id} could not be resolved: {reason}"
            )
            .into(),
            kind: ProblemKind::OptionalDependencyAbsent { dependency_id },
            severity: Severity::Warning,
        }
    }

    /// The optional descriptor referenced by `config_file` failed to
    /// resolve or validate. A warning: optional dependency failures never
    /// fail plugin creation.
    pub fn optional_descriptor_resolution(
        dependency_id: impl Into<SmolStr>,
        config_file: impl Into<SmolStr>,
        reason: &str,
    ) -> Self {
        let dependency_id = dependency_id.into();
        let config_file = config_file.into();
        Self {
            message: format!(
                "optional dependency {dependency_id}: configuration file {config_file} \
                 could not be resolved: {reason}"
            )
            .into(),
            kind: ProblemKind::OptionalDependencyDescriptorResolution {
                dependency_id,
                config_file,
            },
            severity: Severity::Warning,
        }
    }

    /// Optional-dependency configuration files form a cycle. This is a
    /// defect of the plugin's configuration and is an error.
    pub fn cyclic_optional_configuration(cycle: Vec<SmolStr>) -> Self {
        let rendered = cycle.join(" -> ");
        Self {
            message: format!(
                "optional dependency configuration files form a cycle: {rendered}"
            )
            .into(),
            kind: ProblemKind::CyclicOptionalDependencyConfiguration { cycle },
            severity: Severity::Error,
        }
    }

    /// Plugin dependencies form a cycle.
    pub fn dependency_cycle(cycle: Vec<SmolStr>) -> Self {
        let rendered = cycle.join(" -> ");
        Self {
            message: format!("plugin dependencies form a cycle: {rendered}").into(),
            kind: ProblemKind::DependencyCycle { cycle },
            severity: Severity::Error,
        }
    }

    /// A class referenced during verification is not on the classpath.
    pub fn class_not_found(class: impl Into<SmolStr>) -> Self {
        let class = class.into();
        Self {
            message: format!("class {class} is not available on the verification classpath")
                .into(),
            kind: ProblemKind::ClassNotFound { class },
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{severity}: {}", self.message)
    }
}

/// Collects problems during a verification task.
#[derive(Clone, Debug, Default)]
pub struct ProblemCollector {
    problems: Vec<Problem>,
}

impl ProblemCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a problem.
    pub fn add(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    /// All collected problems.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Number of error-severity problems.
    pub fn error_count(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| p.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity problems.
    pub fn warning_count(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| p.severity == Severity::Warning)
            .count()
    }

    /// Whether any error-severity problem was collected.
    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(|p| p.severity == Severity::Error)
    }

    /// Take all problems, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Problem> {
        std::mem::take(&mut self.problems)
    }
}
