//! Host application build identifiers.

use smol_str::SmolStr;
use std::fmt;

/// The version of the host application build a plugin is verified against.
///
/// Opaque to the resolution core; compatibility decisions belong to the
/// plugin repository collaborator.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TargetVersion(SmolStr);

impl TargetVersion {
    /// Create a target version from its string form.
    pub fn new(version: impl Into<SmolStr>) -> Self {
        Self(version.into())
    }

    /// Get the underlying string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetVersion({})", self.0)
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetVersion {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_equality() {
        assert_eq!(TargetVersion::new("IU-251.1"), TargetVersion::from("IU-251.1"));
        assert_ne!(TargetVersion::new("IU-251.1"), TargetVersion::new("IU-252.1"));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(TargetVersion::new("IU-251.1").to_string(), "IU-251.1");
    }
}
