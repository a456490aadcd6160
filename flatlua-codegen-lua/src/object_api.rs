//! Object-based API: plain-data mirrors with `UnPack` and `Pack`.
//!
//! `UnPack` copies a buffer view into a fresh mirror table. `Pack` writes a
//! mirror back through the builders, creating out-of-line children (strings,
//! tables, vectors, union payloads) before the table itself is started.

use flatlua_codegen::builder::{CodeFragment, Renderable};
use flatlua_ir::{Definition, EnumDef, FieldDef, Scalar, Schema, StructDef, Type};

use crate::{
    Error, Result,
    ast::{LuaFn, NumericFor},
    builder::mirror_values,
    naming::{internal_name, method_name, module_path, normalize, param_name, public_name},
    scope::UnitScope,
    types::{bool_literal, describe, is_union_tag},
};

/// Mirror type, `UnPack`, `UnPackTo`, and `Pack` of a struct or table.
pub(crate) fn emit_object_api(scope: &UnitScope<'_>, def: &StructDef) -> Result<Vec<LuaFn>> {
    Ok(vec![
        mirror(scope, def),
        unpack(def),
        unpack_to(scope.schema, def)?,
        pack(scope.schema, def)?,
    ])
}

fn live_fields(def: &StructDef) -> impl Iterator<Item = &FieldDef> {
    def.fields
        .iter()
        .filter(|f| !f.deprecated && !is_union_tag(&f.ty))
}

/// The discriminant field stored next to a union field.
fn union_tag<'d>(def: &'d StructDef, field: &FieldDef) -> Result<&'d FieldDef> {
    let name = format!("{}_type", field.name);
    def.fields
        .iter()
        .find(|f| f.name == name && is_union_tag(&f.ty))
        .ok_or_else(|| {
            Error::invariant(
                def.qualified_name(),
                &field.name,
                format!("union field has no '{}' discriminant", name),
            )
        })
}

fn is_union_field(ty: &Type) -> bool {
    match ty {
        Type::Union(_) => true,
        Type::Vector(element) => matches!(element.as_ref(), Type::Union(_)),
        _ => false,
    }
}

fn union_module(schema: &Schema, ty: &Type) -> String {
    match ty {
        Type::Union(id) => module_path(schema.enum_def(*id)),
        Type::Vector(element) => union_module(schema, element),
        _ => String::new(),
    }
}

fn enum_member(def: &EnumDef, literal: &str) -> Option<String> {
    def.find_by_value(literal)
        .map(|v| format!("require('{}').{}", module_path(def), normalize(&v.name)))
}

/// Initial value of a mirror field.
fn mirror_default(scope: &UnitScope<'_>, field: &FieldDef) -> String {
    let schema = scope.schema;
    match &field.ty {
        Type::Struct(_) => "nil".to_string(),
        Type::String => "\"\"".to_string(),
        Type::Vector(_) | Type::Array { .. } => {
            if scope.options.set_empty_vectors_to_null {
                "nil".to_string()
            } else {
                "{}".to_string()
            }
        }
        Type::Union(id) => format!("require('{}').Union()", module_path(schema.enum_def(*id))),
        Type::Scalar {
            enum_def: Some(id), ..
        } => enum_member(schema.enum_def(*id), &field.default)
            .unwrap_or_else(|| field.default.clone()),
        Type::Scalar {
            scalar: Scalar::Bool,
            ..
        } => bool_literal(&field.default).to_string(),
        Type::Scalar { .. } | Type::UnionType(_) => field.default.clone(),
    }
}

/// `function T.T()` returning a table with every live field at its default.
fn mirror(scope: &UnitScope<'_>, def: &StructDef) -> LuaFn {
    let mut f = LuaFn::new(format!("{}.T", public_name(def))).line("local o = {}");
    for field in live_fields(def) {
        f = f.line(format!("o.{} = {}", method_name(field), mirror_default(scope, field)));
    }
    f.line("return o")
}

fn unpack(def: &StructDef) -> LuaFn {
    LuaFn::new(format!("{}:UnPack", internal_name(def)))
        .line(format!("local o = {}.T()", public_name(def)))
        .line("self:UnPackTo(o)")
        .line("return o")
}

/// Rebuild a union wrapper from the discriminant and payload readers.
fn union_unpack(module: &str, tag_read: &str, value_read: &str, target: &str) -> Vec<CodeFragment> {
    let payload = CodeFragment::block(
        "if d ~= nil then",
        vec![CodeFragment::block(
            "if t == string then",
            vec![CodeFragment::line("u.Value = d")],
            None,
        ),
        CodeFragment::block(
            "else",
            vec![
                CodeFragment::line("local v = t.New()"),
                CodeFragment::line("v:Init(d.bytes, d.pos)"),
                CodeFragment::line("u.Value = v:UnPack()"),
            ],
            Some("end".to_string()),
        )],
        Some("end".to_string()),
    );

    vec![
        CodeFragment::line(format!("local union = require('{}')", module)),
        CodeFragment::line("local u = union.Union()"),
        CodeFragment::line(format!("u.Type = {}", tag_read)),
        CodeFragment::line("local t = union.__dataTypeToClass[u.Type]"),
        CodeFragment::block(
            "if t ~= nil then",
            vec![CodeFragment::line(format!("local d = {}", value_read)), payload],
            Some("end".to_string()),
        ),
        CodeFragment::line(format!("{} = u", target)),
    ]
}

fn unpack_to(schema: &Schema, def: &StructDef) -> Result<LuaFn> {
    let mut f = LuaFn::new(format!("{}:UnPackTo", internal_name(def))).param("o");

    if live_fields(def).any(|field| matches!(field.ty, Type::Vector(_))) {
        f = f.line("local length = 0");
    }

    for field in live_fields(def) {
        let name = method_name(field);
        let target = format!("o.{}", name);

        f = match &field.ty {
            Type::Scalar { .. } | Type::String => {
                f.line(format!("{} = self:{}()", target, name))
            }
            Type::Struct(id) if def.fixed => f.line(format!(
                "{} = self:{}(require('{}').New()):UnPack()",
                target,
                name,
                module_path(schema.struct_def(*id))
            )),
            Type::Struct(_) => f.line(format!(
                "{} = self:{}() ~= nil and self:{}():UnPack() or nil",
                target, name, name
            )),
            Type::Array { element, length } => {
                let item = if schema.is_fixed_struct(element) {
                    format!("self:{}(_j):UnPack()", name)
                } else {
                    format!("self:{}(_j)", name)
                };
                f.line(format!("{} = {{}}", target)).push(
                    NumericFor::ascending("_j", length.to_string())
                        .line(format!("{}[_j] = {}", target, item)),
                )
            }
            Type::Vector(element) => {
                let each = NumericFor::ascending("_j", "length");
                let each = match element.as_ref() {
                    Type::Union(_) => {
                        let tag = method_name(union_tag(def, field)?);
                        each.push(union_unpack(
                            &union_module(schema, &field.ty),
                            &format!("self:{}(_j)", tag),
                            &format!("self:{}(_j)", name),
                            &format!("{}[_j]", target),
                        ))
                    }
                    Type::Struct(_) => each
                        .line(format!("local item = self:{}(_j)", name))
                        .line(format!(
                            "{}[_j] = item ~= nil and item:UnPack() or nil",
                            target
                        )),
                    _ => each.line(format!("{}[_j] = self:{}(_j)", target, name)),
                };
                f.line(format!("length = self:{}Length()", name))
                    .line(format!("{} = {{}}", target))
                    .push(each)
            }
            Type::Union(_) => {
                let tag = method_name(union_tag(def, field)?);
                f.push(CodeFragment::block(
                    "do",
                    union_unpack(
                        &union_module(schema, &field.ty),
                        &format!("self:{}()", tag),
                        &format!("self:{}()", name),
                        &target,
                    ),
                    Some("end".to_string()),
                ))
            }
            Type::UnionType(_) => f,
        };
    }

    Ok(f)
}

/// Create the vector behind a mirror field and store its offset in `var`.
fn vector_pack(
    schema: &Schema,
    def: &StructDef,
    field: &FieldDef,
    element: &Type,
    var: &str,
) -> Result<Vec<CodeFragment>> {
    let owner = public_name(def);
    let source = format!("o.{}", method_name(field));
    let start = format!(
        "{}.Start{}Vector(builder, length)",
        owner,
        method_name(field)
    );

    let mut body = vec![CodeFragment::line(format!("local length = #{}", source))];
    let mut head = vec![CodeFragment::line(format!("local {} = 0", var))];

    // offsets of out-of-line elements are created before the vector starts
    let create = match element {
        Type::String => Some(format!("builder:CreateString({}[_j])", source)),
        Type::Struct(id) if !schema.struct_def(*id).fixed => Some(format!(
            "require('{}').Pack(builder, {}[_j])",
            module_path(schema.struct_def(*id)),
            source
        )),
        Type::Union(_) => Some(format!("union.Pack(builder, {}[_j])", source)),
        _ => None,
    };

    if let Some(create) = &create {
        if let Type::Union(_) = element {
            body.push(CodeFragment::line(format!(
                "local union = require('{}')",
                union_module(schema, &field.ty)
            )));
        }
        body.push(CodeFragment::line("local offsets = {}"));
        body.extend(
            NumericFor::ascending("_j", "length")
                .line(format!("offsets[_j] = {}", create))
                .to_fragments(),
        );
    }

    // a vector of unions carries a parallel vector of discriminants
    if let Type::Union(_) = element {
        let tag = union_tag(def, field)?;
        let tag_var = format!("_{}", param_name(tag));
        head.push(CodeFragment::line(format!("local {} = 0", tag_var)));
        body.push(CodeFragment::line(format!(
            "{}.Start{}Vector(builder, length)",
            owner,
            method_name(tag)
        )));
        body.extend(
            NumericFor::descending("_j", "length")
                .line(format!("builder:PrependUint8({}[_j].Type)", source))
                .to_fragments(),
        );
        body.push(CodeFragment::line(format!(
            "{} = builder:EndVector(length)",
            tag_var
        )));
    }

    let push = match element {
        _ if create.is_some() => "builder:PrependUOffsetTRelative(offsets[_j])".to_string(),
        Type::Scalar { scalar, .. } => {
            format!("builder:Prepend{}({}[_j])", scalar.runtime_name(), source)
        }
        Type::Struct(id) => format!(
            "require('{}').Pack(builder, {}[_j])",
            module_path(schema.struct_def(*id)),
            source
        ),
        other => {
            return Err(Error::invariant(
                def.qualified_name(),
                &field.name,
                format!("a vector cannot hold a {}", describe(schema, other)),
            ));
        }
    };

    body.push(CodeFragment::line(start));
    body.extend(
        NumericFor::descending("_j", "length")
            .line(push)
            .to_fragments(),
    );
    body.push(CodeFragment::line(format!("{} = builder:EndVector(length)", var)));

    head.push(CodeFragment::block(
        format!("if {} ~= nil then", source),
        body,
        Some("end".to_string()),
    ));
    Ok(head)
}

fn pack(schema: &Schema, def: &StructDef) -> Result<LuaFn> {
    let name = public_name(def);
    let f = LuaFn::new(format!("{}.Pack", name)).params(["builder", "o"]);

    if def.fixed {
        let mut args = vec!["builder".to_string()];
        args.extend(mirror_values(schema, def, "o"));
        return Ok(f.line(format!(
            "return {}.Create{}({})",
            name,
            name,
            args.join(", ")
        )));
    }

    // Out-of-line children first
    let mut f = f;
    for field in live_fields(def) {
        let source = format!("o.{}", method_name(field));
        let var = format!("_{}", param_name(field));

        f = match &field.ty {
            Type::String => f.line(format!(
                "local {} = {} == nil and 0 or builder:CreateString({})",
                var, source, source
            )),
            Type::Struct(id) if !schema.struct_def(*id).fixed => f.line(format!(
                "local {} = {} == nil and 0 or require('{}').Pack(builder, {})",
                var,
                source,
                module_path(schema.struct_def(*id)),
                source
            )),
            Type::Vector(element) => f.push(vector_pack(schema, def, field, element, &var)?),
            Type::Union(id) => {
                let tag_var = format!("_{}", param_name(union_tag(def, field)?));
                f.line(format!(
                    "local {} = {} == nil and 0 or {}.Type",
                    tag_var, source, source
                ))
                .line(format!(
                    "local {} = {} == nil and 0 or require('{}').Pack(builder, {})",
                    var,
                    source,
                    module_path(schema.enum_def(*id)),
                    source
                ))
            }
            _ => f,
        };
    }

    // Then the table itself, field by field
    f = f.line(format!("{}.Start(builder)", name));
    for field in live_fields(def) {
        let method = method_name(field);
        let source = format!("o.{}", method);
        let add = format!("{}.Add{}", name, method);

        f = match &field.ty {
            Type::Scalar { .. } => f.line(format!("{}(builder, {})", add, source)),
            Type::Struct(id) if schema.struct_def(*id).fixed => f.push(CodeFragment::block(
                format!("if {} ~= nil then", source),
                vec![CodeFragment::line(format!(
                    "{}(builder, require('{}').Pack(builder, {}))",
                    add,
                    module_path(schema.struct_def(*id)),
                    source
                ))],
                Some("end".to_string()),
            )),
            Type::Union(_) | Type::Vector(_) if is_union_field(&field.ty) => {
                let tag = union_tag(def, field)?;
                f.line(format!(
                    "{}.Add{}(builder, _{})",
                    name,
                    method_name(tag),
                    param_name(tag)
                ))
                .line(format!("{}(builder, _{})", add, param_name(field)))
            }
            Type::Array { .. } => {
                return Err(Error::invariant(
                    def.qualified_name(),
                    &field.name,
                    "arrays are only allowed in fixed structs",
                ));
            }
            _ => f.line(format!("{}(builder, _{})", add, param_name(field))),
        };
    }

    Ok(f.line(format!("return {}.End(builder)", name)))
}
