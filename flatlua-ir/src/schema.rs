//! Schema definitions.

use flatlua_core::Scalar;

use crate::types::{EnumId, StructId, Type};

/// Common accessors for named top-level definitions.
pub trait Definition {
    /// The declared (unescaped) name.
    fn name(&self) -> &str;

    /// Namespace path segments, outermost first.
    fn namespace(&self) -> &[String];

    /// Documentation lines.
    fn doc(&self) -> &[String];

    /// Fully qualified schema name (e.g. `MyGame.Example.Monster`).
    fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = self.namespace().iter().map(String::as_str).collect();
        parts.push(self.name());
        parts.join(".")
    }
}

/// A struct (`fixed`) or table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub namespace: Vec<String>,
    pub doc: Vec<String>,
    /// Fields in declaration order. The index of a field is its table slot.
    pub fields: Vec<FieldDef>,
    /// Fixed structs are stored inline; tables are stored behind an offset.
    pub fixed: bool,
    /// Alignment of a fixed struct.
    pub minalign: u32,
    /// Size in bytes of a fixed struct.
    pub bytesize: u32,
}

impl Definition for StructDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &[String] {
        &self.namespace
    }

    fn doc(&self) -> &[String] {
        &self.doc
    }
}

/// A field of a struct or table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    /// Byte offset inside a fixed struct, or vtable slot offset inside a table.
    pub offset: u32,
    /// Default value literal.
    pub default: String,
    pub deprecated: bool,
    /// Padding bytes that follow this field inside a fixed struct.
    pub padding: u32,
    pub doc: Vec<String>,
}

/// An enum or union definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: String,
    pub namespace: Vec<String>,
    pub doc: Vec<String>,
    pub values: Vec<EnumVal>,
    pub is_union: bool,
    pub underlying: Scalar,
}

impl EnumDef {
    /// Find the member whose value matches a default literal.
    pub fn find_by_value(&self, literal: &str) -> Option<&EnumVal> {
        let value: i64 = literal.trim().parse().ok()?;
        self.values.iter().find(|v| v.value == value)
    }
}

impl Definition for EnumDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &[String] {
        &self.namespace
    }

    fn doc(&self) -> &[String] {
        &self.doc
    }
}

/// A member of an enum or union.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVal {
    pub name: String,
    pub value: i64,
    /// Payload type of a union member (a table, a struct or a string).
    pub union_type: Option<Type>,
    pub doc: Vec<String>,
}

impl EnumVal {
    /// The zero member of a union means "no value".
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

/// A fully resolved schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub structs: Vec<StructDef>,
    pub enums: Vec<EnumDef>,
}

impl Schema {
    /// Borrow a struct or table definition.
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    /// Borrow an enum or union definition.
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    /// Find a struct or table by its qualified name.
    pub fn find_struct(&self, qualified: &str) -> Option<StructId> {
        self.structs
            .iter()
            .position(|s| s.qualified_name() == qualified)
            .map(StructId)
    }

    /// Find an enum or union by its qualified name.
    pub fn find_enum(&self, qualified: &str) -> Option<EnumId> {
        self.enums
            .iter()
            .position(|e| e.qualified_name() == qualified)
            .map(EnumId)
    }

    /// Returns true if the type is stored inline as a fixed struct.
    pub fn is_fixed_struct(&self, ty: &Type) -> bool {
        matches!(ty, Type::Struct(id) if self.struct_def(*id).fixed)
    }

    /// Size in bytes of a value of this type when stored inline.
    ///
    /// Out-of-line values (strings, vectors, tables, unions) are stored as a
    /// 32-bit offset.
    pub fn inline_size(&self, ty: &Type) -> u32 {
        match ty {
            Type::Scalar { scalar, .. } => scalar.size(),
            Type::UnionType(_) => Scalar::UInt8.size(),
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).bytesize,
            Type::String | Type::Struct(_) | Type::Union(_) | Type::Vector(_) => 4,
            Type::Array { element, length } => self.inline_size(element) * u32::from(*length),
        }
    }

    /// Alignment in bytes of a value of this type when stored inline.
    pub fn inline_alignment(&self, ty: &Type) -> u32 {
        match ty {
            Type::Scalar { scalar, .. } => scalar.size(),
            Type::UnionType(_) => Scalar::UInt8.size(),
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).minalign,
            Type::String | Type::Struct(_) | Type::Union(_) | Type::Vector(_) => 4,
            Type::Array { element, .. } => self.inline_alignment(element),
        }
    }
}
