//! Struct creators and table builders.

use flatlua_codegen::builder::{CodeFragment, Renderable};
use flatlua_ir::{Definition, FieldDef, Schema, StructDef, Type};

use crate::{
    Error, Result,
    ast::{LuaFn, NumericFor},
    naming::{method_name, module_path, normalize, param_name, public_name},
    types::{default_value, describe, slot_method},
};

/// Arguments of `Create<Name>`, with nested fixed structs flattened.
///
/// Nested fields are prefixed with the path of struct fields leading to
/// them, so `pos.x` becomes `pos_x`.
pub(crate) fn creator_params(schema: &Schema, def: &StructDef, prefix: &str) -> Vec<String> {
    let mut params = Vec::new();
    for field in &def.fields {
        match &field.ty {
            Type::Struct(id) if schema.struct_def(*id).fixed => {
                let nested = format!("{}{}_", prefix, normalize(&field.name));
                params.extend(creator_params(schema, schema.struct_def(*id), &nested));
            }
            _ => params.push(format!("{}{}", prefix, param_name(field))),
        }
    }
    params
}

/// Mirror values matching [`creator_params`], read from the plain table `base`.
pub(crate) fn mirror_values(schema: &Schema, def: &StructDef, base: &str) -> Vec<String> {
    let mut values = Vec::new();
    for field in &def.fields {
        let value = format!("{}.{}", base, method_name(field));
        match &field.ty {
            Type::Struct(id) if schema.struct_def(*id).fixed => {
                values.extend(mirror_values(schema, schema.struct_def(*id), &value));
            }
            _ => values.push(value),
        }
    }
    values
}

/// `T.CreateT(builder, ...)` for a fixed struct.
pub(crate) fn emit_creator(schema: &Schema, def: &StructDef) -> Result<LuaFn> {
    let name = public_name(def);
    let mut body = Vec::new();
    creator_body(schema, def, def, "", &mut body)?;

    Ok(LuaFn::new(format!("{}.Create{}", name, name))
        .param("builder")
        .params(creator_params(schema, def, ""))
        .push(body)
        .line("return builder:Offset()"))
}

/// Fields are prepended back to front, each preceded by its trailing padding.
fn creator_body(
    schema: &Schema,
    root: &StructDef,
    def: &StructDef,
    prefix: &str,
    body: &mut Vec<CodeFragment>,
) -> Result<()> {
    body.push(CodeFragment::line(format!(
        "builder:Prep({}, {})",
        def.minalign, def.bytesize
    )));

    for field in def.fields.iter().rev() {
        if field.padding > 0 {
            body.push(CodeFragment::line(format!("builder:Pad({})", field.padding)));
        }

        let arg = format!("{}{}", prefix, param_name(field));
        match &field.ty {
            Type::Scalar { scalar, .. } => body.push(CodeFragment::line(format!(
                "builder:Prepend{}({})",
                scalar.runtime_name(),
                arg
            ))),
            Type::Struct(id) if schema.struct_def(*id).fixed => {
                let nested = format!("{}{}_", prefix, normalize(&field.name));
                creator_body(schema, root, schema.struct_def(*id), &nested, body)?;
            }
            Type::Array { element, length } => {
                let item = format!("{}[_j]", arg);
                let step = match element.as_ref() {
                    Type::Scalar { scalar, .. } => {
                        format!("builder:Prepend{}({})", scalar.runtime_name(), item)
                    }
                    Type::Struct(id) if schema.struct_def(*id).fixed => {
                        let element = schema.struct_def(*id);
                        let mut args = vec!["builder".to_string()];
                        args.extend(mirror_values(schema, element, &item));
                        format!(
                            "require('{}').Create{}({})",
                            module_path(element),
                            public_name(element),
                            args.join(", ")
                        )
                    }
                    other => {
                        return Err(Error::invariant(
                            root.qualified_name(),
                            &field.name,
                            format!("an array cannot hold a {}", describe(schema, other)),
                        ));
                    }
                };
                body.extend(
                    NumericFor::descending("_j", length.to_string())
                        .line(step)
                        .to_fragments(),
                );
            }
            other => {
                return Err(Error::invariant(
                    root.qualified_name(),
                    &field.name,
                    format!("a fixed struct cannot hold a {}", describe(schema, other)),
                ));
            }
        }
    }

    Ok(())
}

/// Index of a field's vtable slot, derived from its vtable offset.
fn slot_index(def: &StructDef, field: &FieldDef) -> Result<u32> {
    if field.offset < 4 || field.offset % 2 != 0 {
        return Err(Error::invariant(
            def.qualified_name(),
            &field.name,
            format!("{} is not a vtable offset", field.offset),
        ));
    }
    Ok((field.offset - 4) / 2)
}

/// `Start`, one `Add<Field>` per live field (plus `Start<Field>Vector`), `End`.
pub(crate) fn emit_table_builders(schema: &Schema, def: &StructDef) -> Result<Vec<LuaFn>> {
    let name = public_name(def);

    let mut slots = def.fields.len() as u32;
    for field in &def.fields {
        slots = slots.max(slot_index(def, field)? + 1);
    }

    let mut fns = vec![
        LuaFn::new(format!("{}.Start", name))
            .param("builder")
            .line(format!("builder:StartObject({})", slots))
            .inline(),
    ];

    for field in def.fields.iter().filter(|f| !f.deprecated) {
        if let Type::Array { .. } = field.ty {
            return Err(Error::invariant(
                def.qualified_name(),
                &field.name,
                "arrays are only allowed in fixed structs",
            ));
        }

        let param = param_name(field);
        fns.push(
            LuaFn::new(format!("{}.Add{}", name, method_name(field)))
                .param("builder")
                .param(&param)
                .line(format!(
                    "builder:Prepend{}Slot({}, {}, {})",
                    slot_method(schema, &field.ty),
                    slot_index(def, field)?,
                    param,
                    default_value(field)
                ))
                .inline(),
        );

        if let Type::Vector(element) = &field.ty {
            fns.push(
                LuaFn::new(format!("{}.Start{}Vector", name, method_name(field)))
                    .params(["builder", "numElems"])
                    .line(format!(
                        "return builder:StartVector({}, numElems, {})",
                        schema.inline_size(element),
                        schema.inline_alignment(element)
                    ))
                    .inline(),
            );
        }
    }

    fns.push(
        LuaFn::new(format!("{}.End", name))
            .param("builder")
            .line("return builder:EndObject()")
            .inline(),
    );

    Ok(fns)
}
