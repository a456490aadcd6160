//! Manifest types and parsing for schema.toml files.

mod decl;
mod file;
mod parse;
mod type_expr;
mod validate;

pub use decl::{
    EnumDecl, EnumValueDecl, StructDecl, StructFieldDecl, TableDecl, TableFieldDecl, UnionDecl,
    UnionMemberDecl,
};
pub use file::SchemaToml;
use serde::Deserialize;
pub use type_expr::TypeExpr;
pub use validate::ParseContext;

/// Root manifest for schema.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator options
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub enums: Vec<EnumDecl>,

    #[serde(default)]
    pub unions: Vec<UnionDecl>,

    /// Fixed structs, with their computed layout
    #[serde(default)]
    pub structs: Vec<StructDecl>,

    #[serde(default)]
    pub tables: Vec<TableDecl>,
}

/// The `[options]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Generate the object-based API (mirror types with Pack/UnPack)
    #[serde(default)]
    pub object_api: bool,

    /// Default mirror vectors to nil instead of an empty table
    #[serde(default)]
    pub empty_vectors_nil: bool,
}

/// A reference to a declaration, by kind and position in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclRef {
    Enum(usize),
    Union(usize),
    Struct(usize),
    Table(usize),
}

impl DeclRef {
    /// Declaration kind for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DeclRef::Enum(_) => "enum",
            DeclRef::Union(_) => "union",
            DeclRef::Struct(_) => "struct",
            DeclRef::Table(_) => "table",
        }
    }
}

impl Manifest {
    /// Iterate over every declaration as `(ref, namespace, name)`.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclRef, &[String], &str)> {
        let enums = self
            .enums
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclRef::Enum(i), d.namespace.as_slice(), d.name.as_str()));
        let unions = self
            .unions
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclRef::Union(i), d.namespace.as_slice(), d.name.as_str()));
        let structs = self
            .structs
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclRef::Struct(i), d.namespace.as_slice(), d.name.as_str()));
        let tables = self
            .tables
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclRef::Table(i), d.namespace.as_slice(), d.name.as_str()));
        enums.chain(unions).chain(structs).chain(tables)
    }

    /// Resolve a type name used inside a declaration living in `namespace`.
    ///
    /// Qualified names (`MyGame.Example.Monster`) must match exactly. Bare
    /// names are looked up in the owner's namespace first, then anywhere.
    pub fn resolve(&self, namespace: &[String], name: &str) -> Option<DeclRef> {
        if name.contains('.') {
            return self
                .declarations()
                .find(|(_, ns, n)| qualify(ns, n) == name)
                .map(|(r, _, _)| r);
        }

        self.declarations()
            .find(|(_, ns, n)| *n == name && *ns == namespace)
            .or_else(|| self.declarations().find(|(_, _, n)| *n == name))
            .map(|(r, _, _)| r)
    }

    /// Total number of declarations.
    pub fn len(&self) -> usize {
        self.enums.len() + self.unions.len() + self.structs.len() + self.tables.len()
    }

    /// Check if the manifest declares nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Join namespace segments and a name with dots.
pub(crate) fn qualify(namespace: &[String], name: &str) -> String {
    let mut parts: Vec<&str> = namespace.iter().map(String::as_str).collect();
    parts.push(name);
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn parse(content: &str) -> Manifest {
        Manifest::from_str(content).expect("Failed to parse test manifest")
    }

    #[test]
    fn test_resolve_prefers_own_namespace() {
        let manifest = parse(
            r#"
            [[tables]]
            name = "Stat"
            namespace = ["Other"]

            [[tables]]
            name = "Stat"
            namespace = ["MyGame"]

            [[tables]]
            name = "Monster"
            namespace = ["MyGame"]
            fields = [{ name = "stat", type = "Stat" }]
            "#,
        );

        let ns = vec!["MyGame".to_string()];
        assert_eq!(manifest.resolve(&ns, "Stat"), Some(DeclRef::Table(1)));
        assert_eq!(manifest.resolve(&[], "Stat"), Some(DeclRef::Table(0)));
        assert_eq!(
            manifest.resolve(&ns, "Other.Stat"),
            Some(DeclRef::Table(0))
        );
        assert_eq!(manifest.resolve(&ns, "Weapon"), None);
    }

    #[test]
    fn test_declarations_order() {
        let manifest = parse(
            r#"
            [[tables]]
            name = "Monster"

            [[enums]]
            name = "Color"
            values = [{ name = "Red", value = 0 }]

            [[structs]]
            name = "Vec3"
            minalign = 4
            bytesize = 4
            fields = [{ name = "x", type = "float", offset = 0 }]
            "#,
        );

        let kinds: Vec<&str> = manifest.declarations().map(|(r, _, _)| r.kind()).collect();
        assert_eq!(kinds, ["enum", "struct", "table"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_options_default_off() {
        let manifest = parse("");
        assert!(!manifest.options.object_api);
        assert!(!manifest.options.empty_vectors_nil);
        assert!(manifest.is_empty());
    }
}
