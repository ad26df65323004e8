//! Foundation types for the verification core.
//!
//! This module provides fundamental identity types used throughout the crate:
//! - [`ClassName`] - Slash-delimited binary class names
//! - [`ClassOrigin`] - Provenance of a resolved class
//! - [`TargetVersion`] - Host application build identifier
//!
//! This module has NO dependencies on other veriplug modules.

mod class_name;
mod origin;
mod version;

pub use class_name::ClassName;
pub use origin::{ClassOrigin, OriginKind};
pub use version::TargetVersion;
