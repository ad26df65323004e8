//! Structural class representation.
//!
//! [`ClassDefinition`] is the parsed shape of a class as produced by the
//! external classfile-loading collaborator. The resolution engine only
//! inspects its identity fields (name, superclass, interfaces); members are
//! carried for the consuming verifier.

use crate::base::ClassName;
use smol_str::SmolStr;
use std::sync::Arc;

/// How much of a class definition a resolver retains.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ReadMode {
    /// Keep everything, including member bodies.
    #[default]
    Full,
    /// Keep member names and descriptors, drop bodies.
    ///
    /// Sufficient for classpath context classes, where the verifier only
    /// checks member existence and signatures.
    SignaturesOnly,
}

/// A member (method or field) of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// The member's name.
    pub name: SmolStr,
    /// The JVM descriptor, e.g. `"(I)V"` or `"Ljava/lang/String;"`.
    pub descriptor: SmolStr,
    /// Whether the member is static.
    pub is_static: bool,
    /// Opaque body blob, present only under [`ReadMode::Full`].
    pub code: Option<Arc<[u8]>>,
}

impl Member {
    /// Create a member without a body.
    pub fn new(name: impl Into<SmolStr>, descriptor: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            is_static: false,
            code: None,
        }
    }

    /// Drop the body blob, keeping the signature.
    fn strip_code(mut self) -> Self {
        self.code = None;
        self
    }
}

/// The parsed structural representation of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDefinition {
    /// Fully-qualified binary name.
    pub name: ClassName,
    /// Superclass name, if any (`java/lang/Object` has none).
    pub superclass: Option<ClassName>,
    /// Implemented interface names, in declaration order.
    pub interfaces: Vec<ClassName>,
    /// Whether this class is an interface.
    pub is_interface: bool,
    /// Declared methods.
    pub methods: Vec<Member>,
    /// Declared fields.
    pub fields: Vec<Member>,
}

impl ClassDefinition {
    /// Create a class with no parents and no members.
    pub fn new(name: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            is_interface: false,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Set the superclass name.
    pub fn with_superclass(mut self, name: impl Into<ClassName>) -> Self {
        self.superclass = Some(name.into());
        self
    }

    /// Add an implemented interface name.
    pub fn with_interface(mut self, name: impl Into<ClassName>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    /// Mark this class as an interface.
    pub fn as_interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Add a method.
    pub fn with_method(mut self, member: Member) -> Self {
        self.methods.push(member);
        self
    }

    /// Apply a read mode, stripping member bodies under
    /// [`ReadMode::SignaturesOnly`].
    pub fn in_read_mode(self, mode: ReadMode) -> Self {
        match mode {
            ReadMode::Full => self,
            ReadMode::SignaturesOnly => Self {
                methods: self.methods.into_iter().map(Member::strip_code).collect(),
                fields: self.fields.into_iter().map(Member::strip_code).collect(),
                ..self
            },
        }
    }

    /// All declared parent names: the superclass first, then interfaces.
    pub fn parent_names(&self) -> impl Iterator<Item = &ClassName> {
        self.superclass.iter().chain(self.interfaces.iter())
    }
}
