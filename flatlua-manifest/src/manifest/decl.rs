//! Declaration types of the schema manifest.

use serde::Deserialize;

fn default_underlying() -> String {
    "ubyte".to_string()
}

/// An `[[enums]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Vec<String>,

    #[serde(default)]
    pub doc: Vec<String>,

    /// Underlying integer type (defaults to `ubyte`)
    #[serde(default = "default_underlying")]
    pub underlying: String,

    #[serde(default)]
    pub values: Vec<EnumValueDecl>,
}

/// A member of an enum.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValueDecl {
    pub name: String,
    pub value: i64,

    #[serde(default)]
    pub doc: Vec<String>,
}

/// A `[[unions]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Vec<String>,

    #[serde(default)]
    pub doc: Vec<String>,

    #[serde(default)]
    pub members: Vec<UnionMemberDecl>,
}

impl UnionDecl {
    /// Discriminant of each member, in declaration order.
    ///
    /// Members without an explicit value follow the previous one, starting at 1.
    pub fn member_values(&self) -> Vec<i64> {
        let mut next = 1;
        self.members
            .iter()
            .map(|m| {
                let value = m.value.unwrap_or(next);
                next = value + 1;
                value
            })
            .collect()
    }
}

/// A member of a union.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionMemberDecl {
    pub name: String,

    #[serde(default)]
    pub value: Option<i64>,

    /// Payload type: a table name or `string` (defaults to the member name)
    #[serde(default, rename = "type")]
    pub ty: Option<String>,

    #[serde(default)]
    pub doc: Vec<String>,
}

impl UnionMemberDecl {
    /// The payload type name.
    pub fn payload(&self) -> &str {
        self.ty.as_deref().unwrap_or(&self.name)
    }
}

/// A `[[structs]]` entry: a fixed struct with its computed layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Vec<String>,

    #[serde(default)]
    pub doc: Vec<String>,

    pub minalign: u32,
    pub bytesize: u32,

    #[serde(default)]
    pub fields: Vec<StructFieldDecl>,
}

/// A field of a fixed struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructFieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    /// Byte offset inside the struct
    pub offset: u32,

    /// Padding bytes that follow this field
    #[serde(default)]
    pub padding: u32,

    #[serde(default)]
    pub doc: Vec<String>,
}

/// A `[[tables]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Vec<String>,

    #[serde(default)]
    pub doc: Vec<String>,

    #[serde(default)]
    pub fields: Vec<TableFieldDecl>,
}

/// A field of a table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableFieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    /// Vtable slot offset (defaults to `4 + 2 * index`)
    #[serde(default)]
    pub offset: Option<u32>,

    /// Default value: a number, a boolean, or an enum member name
    #[serde(default)]
    pub default: Option<toml::Value>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub doc: Vec<String>,
}
