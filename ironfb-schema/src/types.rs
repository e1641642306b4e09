//! Schema type definitions.
//!
//! This module contains the scalar kinds of the wire format, the tagged
//! [`Type`] carried by every field, and dotted namespaces.

use crate::ir::{EnumId, StructId};
use std::fmt;

/// Fixed-width scalar kinds of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Boolean stored as a single byte.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
}

impl ScalarKind {
    /// All scalar kinds, smallest first.
    pub const ALL: [ScalarKind; 11] = [
        Self::Bool,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
    ];

    /// Returns the size of the scalar in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Returns true for the eight integer kinds (not bool, not floats).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Bool | Self::Float32 | Self::Float64)
    }

    /// Returns true if this is an unsigned integer kind.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    /// Returns true if this is a floating point kind.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns the schema-language spelling of the kind.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "byte",
            Self::UInt8 => "ubyte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Float32 => "float",
            Self::Float64 => "double",
        }
    }

    /// Parses a scalar kind from its schema-language spelling.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.schema_name() == name)
    }
}

/// The type of a field.
///
/// An enum-typed field is a scalar carrying a reference to its [`EnumDef`]:
/// being an enum is a modifier on the integer kind, not a separate base type.
///
/// [`EnumDef`]: crate::definitions::EnumDef
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Bool or a fixed-width number, optionally backed by an enum.
    Scalar {
        /// Storage kind on the wire.
        kind: ScalarKind,
        /// Enum this value is declared as, if any.
        enum_def: Option<EnumId>,
    },
    /// Length-prefixed UTF-8 string.
    String,
    /// Vector of the given element type.
    Vector(Box<Type>),
    /// Inline fixed struct or offset to a table.
    Struct(StructId),
    /// Offset to a union variant; the discriminant is a sibling field.
    Union(EnumId),
}

impl Type {
    /// Creates a plain scalar type.
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar {
            kind,
            enum_def: None,
        }
    }

    /// Creates an enum-typed scalar backed by `kind`.
    #[must_use]
    pub const fn enumeration(kind: ScalarKind, enum_def: EnumId) -> Self {
        Self::Scalar {
            kind,
            enum_def: Some(enum_def),
        }
    }

    /// Creates a vector type.
    #[must_use]
    pub fn vector(element: Type) -> Self {
        Self::Vector(Box::new(element))
    }

    /// Returns true for bool and numeric types (including enums).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    /// Returns the scalar kind, if this is a scalar.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if this is an integer scalar declared as an enum.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        match self {
            Self::Scalar {
                kind,
                enum_def: Some(_),
            } => kind.is_integer(),
            _ => false,
        }
    }

    /// Returns the enum referenced by an enum-typed scalar.
    #[must_use]
    pub const fn enum_def(&self) -> Option<EnumId> {
        match self {
            Self::Scalar { enum_def, .. } => *enum_def,
            _ => None,
        }
    }

    /// Returns true if this is a bool scalar.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(
            self,
            Self::Scalar {
                kind: ScalarKind::Bool,
                ..
            }
        )
    }

    /// Returns true if this is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Returns true if this is a vector.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Returns true if this is a union.
    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Returns the element type of a vector.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::Vector(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the referenced struct or table.
    #[must_use]
    pub const fn struct_id(&self) -> Option<StructId> {
        match self {
            Self::Struct(id) => Some(*id),
            _ => None,
        }
    }
}

/// Dotted namespace, compared componentwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    /// Path components, outermost first.
    pub components: Vec<String>,
}

impl Namespace {
    /// The root namespace.
    pub const ROOT: Namespace = Namespace {
        components: Vec::new(),
    };

    /// Creates a namespace from its components.
    #[must_use]
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a dotted namespace such as `MyGame.Example`.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|c| !c.is_empty()))
    }

    /// Returns true for the root namespace.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the components joined with `.`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.components.join(".")
    }

    /// Returns `name` qualified by this namespace.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        let mut qualified = String::new();
        for component in &self.components {
            qualified.push_str(component);
            qualified.push('.');
        }
        qualified.push_str(name);
        qualified
    }

    /// Returns this namespace and each enclosing one, innermost first.
    ///
    /// The root namespace is not included.
    pub fn enclosing(&self) -> impl Iterator<Item = Namespace> + '_ {
        (1..=self.components.len())
            .rev()
            .map(|len| Namespace::new(self.components[..len].iter().cloned()))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}
