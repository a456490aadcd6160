//! Field types.

use flatlua_core::Scalar;

/// Index of a struct or table definition in [`Schema::structs`](crate::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub usize);

/// Index of an enum or union definition in [`Schema::enums`](crate::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(pub usize);

/// The type of a field, vector element, or union member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// An inline scalar, optionally typed by an enum.
    Scalar {
        scalar: Scalar,
        enum_def: Option<EnumId>,
    },
    /// The discriminant of a union, stored as `ubyte`.
    UnionType(EnumId),
    /// An offset to a UTF-8 string.
    String,
    /// A fixed struct (stored inline) or a table (stored behind an offset).
    Struct(StructId),
    /// An offset to the payload of a union.
    Union(EnumId),
    /// An offset to a vector of elements.
    Vector(Box<Type>),
    /// A fixed-length array, only valid inside fixed structs.
    Array { element: Box<Type>, length: u16 },
}

impl Type {
    /// A plain scalar without enum typing.
    pub fn scalar(scalar: Scalar) -> Self {
        Type::Scalar {
            scalar,
            enum_def: None,
        }
    }

    /// Get the scalar kind, treating union discriminants as `ubyte`.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Type::Scalar { scalar, .. } => Some(*scalar),
            Type::UnionType(_) => Some(Scalar::UInt8),
            _ => None,
        }
    }

    /// Short human-readable kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Scalar { enum_def: None, .. } => "scalar",
            Type::Scalar { .. } => "enum",
            Type::UnionType(_) => "union type",
            Type::String => "string",
            Type::Struct(_) => "struct",
            Type::Union(_) => "union",
            Type::Vector(_) => "vector",
            Type::Array { .. } => "array",
        }
    }
}
