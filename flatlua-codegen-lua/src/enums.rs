//! Enum and union modules.

use flatlua_codegen::builder::{CodeFragment, Renderable};
use flatlua_ir::{Definition, EnumDef, Type};

use crate::{
    Error, Result,
    ast::{LuaFn, LuaTable},
    naming::{module_path, normalize, public_name},
    scope::UnitScope,
};

/// Body of an enum or union module.
///
/// Every enum becomes a name → value table. A union additionally gets its
/// discriminant → class map, `Union()`, and `Pack` when the object API is on.
pub(crate) fn emit_enum(scope: &UnitScope<'_>, def: &EnumDef) -> Result<Vec<CodeFragment>> {
    let mut body = value_table(def).to_fragments();

    if def.is_union && scope.options.generate_object_based_api {
        body.push(CodeFragment::blank());
        body.extend(union_api(scope, def)?);
    }

    Ok(body)
}

fn value_table(def: &EnumDef) -> LuaTable {
    def.values.iter().fold(
        LuaTable::new(public_name(def)).doc(&def.doc),
        |table, value| {
            table.entry(&value.doc, normalize(&value.name), value.value.to_string())
        },
    )
}

/// The class a discriminant unpacks into: a module, or Lua's `string` table.
fn member_class(scope: &UnitScope<'_>, def: &EnumDef, index: usize) -> Result<String> {
    let value = &def.values[index];
    let invalid = |reason: &str| Error::invariant(def.qualified_name(), &value.name, reason);

    match &value.union_type {
        Some(Type::String) => Ok("string".to_string()),
        Some(Type::Struct(id)) => Ok(format!(
            "require('{}')",
            module_path(scope.schema.struct_def(*id))
        )),
        Some(_) => Err(invalid("a union can only hold tables, structs and strings")),
        None => Err(invalid("union member has no payload type")),
    }
}

fn union_api(scope: &UnitScope<'_>, def: &EnumDef) -> Result<Vec<CodeFragment>> {
    let name = public_name(def);
    let mut body = vec![CodeFragment::line("local dataTypeToClass = {}")];

    for (index, value) in def.values.iter().enumerate() {
        if value.is_zero() {
            continue;
        }
        body.push(CodeFragment::line(format!(
            "dataTypeToClass[{}] = {}",
            value.value,
            member_class(scope, def, index)?
        )));
    }
    body.push(CodeFragment::line(format!(
        "{}.__dataTypeToClass = dataTypeToClass",
        name
    )));

    let wrapper = LuaFn::new(format!("{}.Union", name)).line("return { Type = 0, Value = nil }");

    let pack = LuaFn::new(format!("{}.Pack", name))
        .params(["builder", "u"])
        .line("local t = dataTypeToClass[u.Type]")
        .push(CodeFragment::block(
            "if t == nil or u.Value == nil then",
            vec![CodeFragment::line("return 0")],
            Some("end".to_string()),
        ))
        .push(CodeFragment::block(
            "if t == string then",
            vec![CodeFragment::line("return builder:CreateString(u.Value)")],
            Some("end".to_string()),
        ))
        .line("return t.Pack(builder, u.Value)");

    body.push(CodeFragment::blank());
    body.extend(wrapper.to_fragments());
    body.push(CodeFragment::blank());
    body.extend(pack.to_fragments());
    Ok(body)
}
