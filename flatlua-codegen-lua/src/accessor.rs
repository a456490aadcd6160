//! Field accessors.
//!
//! Fixed structs are read at constant offsets from the view position. Table
//! fields go through the vtable: every table accessor resolves its slot once
//! with a [`Guard`] and returns from each branch.

use flatlua_codegen::builder::CodeFragment;
use flatlua_ir::{Definition, FieldDef, Scalar, StructDef, Type};

use crate::{
    Error, Result,
    ast::{Guard, LuaFn},
    naming::{internal_name, method_name, module_path},
    scope::UnitScope,
    types::{absent_element, default_value, describe, read_scalar},
};

/// Emit the accessor of a field, followed by its length accessor for vectors.
///
/// Deprecated fields are skipped by the caller.
pub(crate) fn emit_accessor(
    scope: &mut UnitScope<'_>,
    owner: &StructDef,
    field: &FieldDef,
) -> Result<Vec<LuaFn>> {
    let f = LuaFn::new(format!("{}:{}", internal_name(owner), method_name(field))).doc(&field.doc);

    if owner.fixed {
        return Ok(vec![fixed_accessor(scope, owner, field, f)?]);
    }

    let accessor = table_accessor(scope, owner, field, f)?;
    if matches!(field.ty, Type::Vector(_)) {
        Ok(vec![accessor, length_accessor(owner, field)])
    } else {
        Ok(vec![accessor])
    }
}

fn invalid(owner: &StructDef, field: &FieldDef, reason: String) -> Error {
    Error::invariant(owner.qualified_name(), &field.name, reason)
}

/// `local obj = require(...).New()` initialized at `at`.
fn init_object(def: &StructDef, at: &str) -> Vec<CodeFragment> {
    vec![
        CodeFragment::line(format!("local obj = require('{}').New()", module_path(def))),
        CodeFragment::line(format!("obj:Init(self.view.bytes, {})", at)),
        CodeFragment::line("return obj"),
    ]
}

/// An empty view filled in by `self.view:Union`.
fn union_object(scope: &mut UnitScope<'_>) -> CodeFragment {
    let rt = scope.runtime();
    CodeFragment::line(format!(
        "local obj = {}.view.New(require('{}.binaryarray').New(0), 0)",
        rt, rt
    ))
}

fn fixed_accessor(
    scope: &mut UnitScope<'_>,
    owner: &StructDef,
    field: &FieldDef,
    f: LuaFn,
) -> Result<LuaFn> {
    let schema = scope.schema;
    let at = format!("self.view.pos + {}", field.offset);

    match &field.ty {
        Type::Scalar { scalar, .. } => {
            Ok(f.line(format!("return {}", read_scalar(scope, *scalar, &at))))
        }
        Type::Struct(id) if schema.struct_def(*id).fixed => Ok(f
            .param("obj")
            .line(format!("obj:Init(self.view.bytes, {})", at))
            .line("return obj")),
        Type::Array { element, .. } => {
            let at = format!("{} + ((j-1) * {})", at, schema.inline_size(element));
            let f = f.param("j");
            match element.as_ref() {
                Type::Scalar { scalar, .. } => {
                    Ok(f.line(format!("return {}", read_scalar(scope, *scalar, &at))))
                }
                Type::Struct(id) if schema.struct_def(*id).fixed => {
                    Ok(f.push(init_object(schema.struct_def(*id), &at)))
                }
                other => Err(invalid(
                    owner,
                    field,
                    format!("an array cannot hold a {}", describe(schema, other)),
                )),
            }
        }
        other => Err(invalid(
            owner,
            field,
            format!("a fixed struct cannot hold a {}", describe(schema, other)),
        )),
    }
}

fn table_accessor(
    scope: &mut UnitScope<'_>,
    owner: &StructDef,
    field: &FieldDef,
    f: LuaFn,
) -> Result<LuaFn> {
    let schema = scope.schema;
    let guard = Guard::new(field.offset);

    let guard = match &field.ty {
        Type::Scalar { scalar, .. } => scalar_slot(scope, guard, *scalar, field),
        Type::UnionType(_) => scalar_slot(scope, guard, Scalar::UInt8, field),
        Type::Struct(id) => {
            let def = schema.struct_def(*id);
            let locate = if def.fixed {
                "local x = o + self.view.pos"
            } else {
                "local x = self.view:Indirect(o + self.view.pos)"
            };
            guard.line(locate).push(init_object(def, "x"))
        }
        // absent strings fall off the end and read as nil
        Type::String => guard.line("return self.view:String(o + self.view.pos)"),
        Type::Union(_) => guard
            .push(union_object(scope))
            .line("self.view:Union(obj, o)")
            .line("return obj"),
        Type::Vector(element) => {
            return Ok(f.param("j").push(vector_element(scope, owner, field, element)?));
        }
        Type::Array { .. } => {
            return Err(invalid(
                owner,
                field,
                "arrays are only allowed in fixed structs".to_string(),
            ));
        }
    };

    Ok(f.push(guard))
}

fn scalar_slot(scope: &mut UnitScope<'_>, guard: Guard, scalar: Scalar, field: &FieldDef) -> Guard {
    let read = read_scalar(scope, scalar, "o + self.view.pos");
    guard
        .line(format!("return {}", read))
        .otherwise(default_value(field))
}

fn vector_element(
    scope: &mut UnitScope<'_>,
    owner: &StructDef,
    field: &FieldDef,
    element: &Type,
) -> Result<Guard> {
    let schema = scope.schema;
    let size = schema.inline_size(element);
    let guard = Guard::new(field.offset);

    let guard = match element {
        Type::Scalar { .. } | Type::UnionType(_) | Type::String => {
            let at = format!("a + ((j-1) * {})", size);
            let read = match element.as_scalar() {
                Some(scalar) => read_scalar(scope, scalar, &at),
                None => format!("self.view:String({})", at),
            };
            guard
                .line("local a = self.view:Vector(o)")
                .line(format!("return {}", read))
                .otherwise(absent_element(element))
        }
        Type::Struct(id) => {
            let def = schema.struct_def(*id);
            let mut guard = guard
                .line("local x = self.view:Vector(o)")
                .line(format!("x = x + ((j-1) * {})", size));
            if !def.fixed {
                guard = guard.line("x = self.view:Indirect(x)");
            }
            guard.push(init_object(def, "x"))
        }
        Type::Union(_) => guard
            .line("local x = self.view:Vector(o)")
            .line(format!("x = x + ((j-1) * {})", size))
            .push(union_object(scope))
            .line("self.view:Union(obj, x - self.view.pos)")
            .line("return obj"),
        other => {
            return Err(invalid(
                owner,
                field,
                format!("a vector cannot hold a {}", describe(schema, other)),
            ));
        }
    };

    Ok(guard)
}

fn length_accessor(owner: &StructDef, field: &FieldDef) -> LuaFn {
    LuaFn::new(format!("{}:{}Length", internal_name(owner), method_name(field))).push(
        Guard::new(field.offset)
            .line("return self.view:VectorLen(o)")
            .otherwise("0"),
    )
}
