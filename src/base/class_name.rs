//! Binary class names and package derivation.

use smol_str::SmolStr;
use std::fmt;

/// A fully-qualified binary class name, slash-delimited.
///
/// `ClassName` is a lightweight handle around an inline-allocated string
/// (e.g. `"some/package/Foo"`). Names form the unique key space of the
/// resolution engine.
///
/// Benefits:
/// - Cheap to clone and hash (inline storage for short names)
/// - Package derivation without allocation
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClassName(SmolStr);

impl ClassName {
    /// Create a class name from a slash-delimited string.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    /// Get the underlying string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package of this class: the name truncated to the last `/`.
    ///
    /// The empty string is the root package:
    /// - `"some/package/Foo"` → `"some/package"`
    /// - `"Foo"` → `""`
    pub fn package(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The simple (unqualified) name: everything after the last `/`.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Every proper prefix path of this name.
    ///
    /// `"some/package/Foo"` yields `"some"` and `"some/package"`.
    /// A root-package class yields nothing.
    pub fn package_prefixes(&self) -> impl Iterator<Item = &str> {
        let name = self.0.as_str();
        name.match_indices('/').map(move |(idx, _)| &name[..idx])
    }

    /// Render as a dot-separated source-level name (for diagnostics).
    pub fn to_source_name(&self) -> String {
        self.0.replace('/', ".")
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_of_nested_class() {
        let name = ClassName::new("some/package/Foo");
        assert_eq!(name.package(), "some/package");
        assert_eq!(name.simple_name(), "Foo");
    }

    #[test]
    fn test_root_package_is_empty() {
        let name = ClassName::new("Foo");
        assert_eq!(name.package(), "");
        assert_eq!(name.simple_name(), "Foo");
    }

    #[test]
    fn test_package_prefixes() {
        let name = ClassName::new("some/package/Foo");
        let prefixes: Vec<_> = name.package_prefixes().collect();
        assert_eq!(prefixes, vec!["some", "some/package"]);
    }

    #[test]
    fn test_package_prefixes_root() {
        let name = ClassName::new("Foo");
        assert_eq!(name.package_prefixes().count(), 0);
    }

    #[test]
    fn test_source_name() {
        let name = ClassName::new("some/package/Foo");
        assert_eq!(name.to_source_name(), "some.package.Foo");
    }
}
