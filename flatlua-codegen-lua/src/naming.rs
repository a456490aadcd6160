//! Lua naming conventions.
//!
//! Every name that reaches generated code goes through [`normalize`] first,
//! so schema names that collide with Lua keywords get a leading underscore.

use flatlua_codegen::language::NamingConvention;
use flatlua_core::make_camel;
use flatlua_ir::{Definition, FieldDef};

fn keep(name: &str) -> String {
    name.to_string()
}

fn upper_camel(name: &str) -> String {
    make_camel(name, true)
}

fn lower_camel(name: &str) -> String {
    make_camel(name, false)
}

fn escape_lua_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// Lua naming conventions.
pub const LUA_NAMING: NamingConvention = NamingConvention {
    // Definitions keep their schema name
    definition_to_type: keep,
    // Accessors and builder functions use UpperCamel
    field_to_method: upper_camel,
    // Builder arguments use lowerCamel
    field_to_param: lower_camel,
    reserved_words: &[
        "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
        "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    ],
    escape_reserved: escape_lua_reserved,
};

/// Escape a Lua keyword, leaving every other name untouched.
pub fn normalize(name: &str) -> String {
    LUA_NAMING.safe_name(name)
}

/// Name of the module table of a definition.
pub fn public_name(def: &impl Definition) -> String {
    LUA_NAMING.type_name(def.name())
}

/// Name of the metatable shared by instances of a struct or table.
pub fn internal_name(def: &impl Definition) -> String {
    format!("{}_mt", public_name(def))
}

/// Dotted module path used with `require`, e.g. `MyGame.Example.Monster`.
pub fn module_path(def: &impl Definition) -> String {
    let mut parts: Vec<String> = def.namespace().to_vec();
    parts.push(public_name(def));
    parts.join(".")
}

/// Output file of a definition, relative to the output directory.
pub(crate) fn file_path(def: &impl Definition) -> String {
    let mut parts: Vec<String> = def.namespace().to_vec();
    parts.push(format!("{}.lua", public_name(def)));
    parts.join("/")
}

/// Accessor and mirror field name (`test_type` → `TestType`).
pub(crate) fn method_name(field: &FieldDef) -> String {
    LUA_NAMING.method_name(&field.name)
}

/// Builder argument name (`test_type` → `testType`).
pub(crate) fn param_name(field: &FieldDef) -> String {
    LUA_NAMING.param_name(&field.name)
}

#[cfg(test)]
mod tests {
    use flatlua_ir::{EnumDef, Scalar, StructDef};

    use super::*;

    fn table(name: &str, namespace: &[&str]) -> StructDef {
        StructDef {
            name: name.into(),
            namespace: namespace.iter().map(|s| s.to_string()).collect(),
            doc: Vec::new(),
            fields: Vec::new(),
            fixed: false,
            minalign: 1,
            bytesize: 0,
        }
    }

    #[test]
    fn test_normalize_keywords() {
        assert_eq!(normalize("end"), "_end");
        assert_eq!(normalize("function"), "_function");
        assert_eq!(normalize("Monster"), "Monster");
        // only exact matches are reserved
        assert_eq!(normalize("End"), "End");
        assert_eq!(normalize("ending"), "ending");
    }

    #[test]
    fn test_lua_reserved_words() {
        assert_eq!(LUA_NAMING.reserved_words.len(), 22);
        assert!(LUA_NAMING.is_reserved("goto"));
        assert!(LUA_NAMING.is_reserved("nil"));
        assert!(!LUA_NAMING.is_reserved("self"));
    }

    #[test]
    fn test_definition_names() {
        let monster = table("Monster", &["MyGame", "Example"]);
        assert_eq!(public_name(&monster), "Monster");
        assert_eq!(internal_name(&monster), "Monster_mt");
        assert_eq!(module_path(&monster), "MyGame.Example.Monster");
        assert_eq!(file_path(&monster), "MyGame/Example/Monster.lua");
    }

    #[test]
    fn test_reserved_definition_names() {
        let until = table("until", &[]);
        assert_eq!(public_name(&until), "_until");
        assert_eq!(internal_name(&until), "_until_mt");
        assert_eq!(module_path(&until), "_until");
        assert_eq!(file_path(&until), "_until.lua");

        let color = EnumDef {
            name: "Color".into(),
            namespace: vec!["MyGame".into()],
            doc: Vec::new(),
            values: Vec::new(),
            is_union: false,
            underlying: Scalar::UInt8,
        };
        assert_eq!(module_path(&color), "MyGame.Color");
    }

    #[test]
    fn test_field_names() {
        let field = FieldDef {
            name: "test_type".into(),
            ty: flatlua_ir::Type::scalar(Scalar::UInt8),
            offset: 4,
            default: "0".into(),
            deprecated: false,
            padding: 0,
            doc: Vec::new(),
        };
        assert_eq!(method_name(&field), "TestType");
        assert_eq!(param_name(&field), "testType");

        let reserved = FieldDef {
            name: "end".into(),
            ..field
        };
        assert_eq!(method_name(&reserved), "_end");
        assert_eq!(param_name(&reserved), "End");
    }
}
