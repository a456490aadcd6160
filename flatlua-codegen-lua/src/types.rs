//! Mapping of schema types onto the Lua runtime.

use flatlua_ir::{FieldDef, Scalar, Schema, Type};

use crate::scope::UnitScope;

/// Read a scalar at `at` through the view. Booleans come back as Lua booleans.
pub(crate) fn read_scalar(scope: &mut UnitScope<'_>, scalar: Scalar, at: &str) -> String {
    let read = format!(
        "self.view:Get({}.N.{}, {})",
        scope.runtime(),
        scalar.runtime_name(),
        at
    );
    if scalar == Scalar::Bool {
        format!("({} ~= 0)", read)
    } else {
        read
    }
}

/// Default value of a field as a Lua literal.
pub(crate) fn default_value(field: &FieldDef) -> String {
    match field.ty.as_scalar() {
        Some(Scalar::Bool) => bool_literal(&field.default).to_string(),
        _ => field.default.clone(),
    }
}

pub(crate) fn bool_literal(constant: &str) -> &'static str {
    if constant == "0" { "false" } else { "true" }
}

/// Value an element accessor returns when the vector is absent.
pub(crate) fn absent_element(element: &Type) -> &'static str {
    match element {
        Type::String => "''",
        ty if ty.as_scalar() == Some(Scalar::Bool) => "false",
        _ => "0",
    }
}

/// Suffix of the `builder:Prepend<...>Slot` call for a table field.
pub(crate) fn slot_method(schema: &Schema, ty: &Type) -> &'static str {
    match ty {
        Type::Scalar { scalar, .. } => scalar.runtime_name(),
        Type::UnionType(_) => Scalar::UInt8.runtime_name(),
        ty if schema.is_fixed_struct(ty) => "Struct",
        _ => "UOffsetTRelative",
    }
}

/// Discriminant fields are written alongside their union and never mirrored.
pub(crate) fn is_union_tag(ty: &Type) -> bool {
    match ty {
        Type::UnionType(_) => true,
        Type::Vector(element) => matches!(element.as_ref(), Type::UnionType(_)),
        _ => false,
    }
}

/// Kind of a type for error messages, telling tables apart from structs.
pub(crate) fn describe(schema: &Schema, ty: &Type) -> &'static str {
    match ty {
        Type::Struct(id) if !schema.struct_def(*id).fixed => "table",
        ty => ty.kind(),
    }
}
