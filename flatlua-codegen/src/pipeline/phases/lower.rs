//! Lower phase - resolves the manifest into a schema.
//!
//! Names are resolved to typed indices, union discriminant companions and the
//! implicit `NONE` member are inserted, and defaults are normalized to the
//! literal text generators print.

use eyre::{Result, eyre};
use flatlua_core::{Scalar, toml_value_to_string};
use flatlua_ir::{EnumDef, EnumId, EnumVal, FieldDef, Schema, StructDef, StructId, Type};
use flatlua_manifest::{
    DeclRef, EnumDecl, Manifest, StructDecl, TableDecl, TableFieldDecl, TypeExpr, UnionDecl,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that resolves the manifest into a [`Schema`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Resolve the manifest into a schema"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        ctx.schema = Some(lower_manifest(&ctx.manifest)?);
        Ok(())
    }
}

/// Lower a manifest into a resolved schema.
///
/// Enums come before unions in [`Schema::enums`], and fixed structs before
/// tables in [`Schema::structs`], each in declaration order.
pub fn lower_manifest(manifest: &Manifest) -> Result<Schema> {
    let lower = Lowering { manifest };

    let mut enums = Vec::with_capacity(manifest.enums.len() + manifest.unions.len());
    for decl in &manifest.enums {
        enums.push(lower.enum_def(decl)?);
    }
    for decl in &manifest.unions {
        enums.push(lower.union_def(decl)?);
    }

    let mut structs = Vec::with_capacity(manifest.structs.len() + manifest.tables.len());
    for decl in &manifest.structs {
        structs.push(lower.struct_def(decl)?);
    }
    for decl in &manifest.tables {
        structs.push(lower.table_def(decl)?);
    }

    Ok(Schema { structs, enums })
}

struct Lowering<'a> {
    manifest: &'a Manifest,
}

impl Lowering<'_> {
    fn enum_def(&self, decl: &EnumDecl) -> Result<EnumDef> {
        Ok(EnumDef {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            doc: decl.doc.clone(),
            values: decl
                .values
                .iter()
                .map(|v| EnumVal {
                    name: v.name.clone(),
                    value: v.value,
                    union_type: None,
                    doc: v.doc.clone(),
                })
                .collect(),
            is_union: false,
            underlying: underlying(decl)?,
        })
    }

    fn union_def(&self, decl: &UnionDecl) -> Result<EnumDef> {
        let mut values = vec![EnumVal {
            name: "NONE".to_string(),
            value: 0,
            union_type: None,
            doc: Vec::new(),
        }];

        for (member, value) in decl.members.iter().zip(decl.member_values()) {
            let payload = match member.payload() {
                "string" => Type::String,
                name => self.named(&decl.namespace, name)?,
            };
            values.push(EnumVal {
                name: member.name.clone(),
                value,
                union_type: Some(payload),
                doc: member.doc.clone(),
            });
        }

        Ok(EnumDef {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            doc: decl.doc.clone(),
            values,
            is_union: true,
            underlying: Scalar::UInt8,
        })
    }

    fn struct_def(&self, decl: &StructDecl) -> Result<StructDef> {
        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            fields.push(FieldDef {
                name: field.name.clone(),
                ty: self.field_type(&decl.namespace, &field.ty)?,
                offset: field.offset,
                default: "0".to_string(),
                deprecated: false,
                padding: field.padding,
                doc: field.doc.clone(),
            });
        }

        Ok(StructDef {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            doc: decl.doc.clone(),
            fields,
            fixed: true,
            minalign: decl.minalign,
            bytesize: decl.bytesize,
        })
    }

    fn table_def(&self, decl: &TableDecl) -> Result<StructDef> {
        let mut fields: Vec<FieldDef> = Vec::with_capacity(decl.fields.len());

        for field in &decl.fields {
            let ty = match self.declared_tag(decl, field)? {
                Some(tag) => tag,
                None => self.field_type(&decl.namespace, &field.ty)?,
            };
            let explicit = field.offset;

            if let Some(tag) = union_tag(&ty) {
                let companion = format!("{}_type", field.name);
                let declared = decl.fields.iter().any(|f| f.name == companion);
                if !declared {
                    let offset = match explicit {
                        Some(offset) => offset.saturating_sub(2),
                        None => slot(fields.len()),
                    };
                    fields.push(FieldDef {
                        name: companion,
                        ty: tag,
                        offset,
                        default: "0".to_string(),
                        deprecated: field.deprecated,
                        padding: 0,
                        doc: Vec::new(),
                    });
                }
            }

            let default = self.default_literal(field, &ty)?;
            fields.push(FieldDef {
                name: field.name.clone(),
                ty,
                offset: explicit.unwrap_or_else(|| slot(fields.len())),
                default,
                deprecated: field.deprecated,
                padding: 0,
                doc: field.doc.clone(),
            });
        }

        Ok(StructDef {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            doc: decl.doc.clone(),
            fields,
            fixed: false,
            minalign: 1,
            bytesize: 0,
        })
    }

    /// A declared `<f>_type` field takes the discriminant type of union `f`.
    fn declared_tag(&self, decl: &TableDecl, field: &TableFieldDecl) -> Result<Option<Type>> {
        let Some(base) = field.name.strip_suffix("_type") else {
            return Ok(None);
        };
        match decl.fields.iter().find(|f| f.name == base) {
            Some(union_field) => {
                let ty = self.field_type(&decl.namespace, &union_field.ty)?;
                Ok(union_tag(&ty))
            }
            None => Ok(None),
        }
    }

    fn field_type(&self, namespace: &[String], ty: &str) -> Result<Type> {
        let expr: TypeExpr = ty
            .parse()
            .map_err(|reason: String| eyre!("invalid type '{}': {}", ty, reason))?;
        self.lower_type(namespace, &expr)
    }

    fn lower_type(&self, namespace: &[String], expr: &TypeExpr) -> Result<Type> {
        Ok(match expr {
            TypeExpr::Scalar(scalar) => Type::scalar(*scalar),
            TypeExpr::String => Type::String,
            TypeExpr::Named(name) => self.named(namespace, name)?,
            TypeExpr::Vector(element) => Type::Vector(Box::new(self.lower_type(namespace, element)?)),
            TypeExpr::Array { element, length } => Type::Array {
                element: Box::new(self.lower_type(namespace, element)?),
                length: *length,
            },
        })
    }

    fn named(&self, namespace: &[String], name: &str) -> Result<Type> {
        let manifest = self.manifest;
        let resolved = manifest
            .resolve(namespace, name)
            .ok_or_else(|| eyre!("unknown type '{}'", name))?;

        Ok(match resolved {
            DeclRef::Enum(idx) => Type::Scalar {
                scalar: underlying(&manifest.enums[idx])?,
                enum_def: Some(EnumId(idx)),
            },
            DeclRef::Union(idx) => Type::Union(EnumId(manifest.enums.len() + idx)),
            DeclRef::Struct(idx) => Type::Struct(StructId(idx)),
            DeclRef::Table(idx) => Type::Struct(StructId(manifest.structs.len() + idx)),
        })
    }

    /// The default literal of a table field, as generators print it.
    fn default_literal(&self, field: &TableFieldDecl, ty: &Type) -> Result<String> {
        let Some(value) = &field.default else {
            return Ok("0".to_string());
        };

        match value {
            toml::Value::Boolean(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            toml::Value::String(member) => {
                let Type::Scalar {
                    enum_def: Some(id), ..
                } = ty
                else {
                    return Err(eyre!(
                        "field '{}' has a named default but is not an enum",
                        field.name
                    ));
                };
                let decl = &self.manifest.enums[id.0];
                decl.values
                    .iter()
                    .find(|v| v.name == *member)
                    .map(|v| v.value.to_string())
                    .ok_or_else(|| eyre!("'{}' is not a member of enum '{}'", member, decl.name))
            }
            other => Ok(toml_value_to_string(other)),
        }
    }
}

/// Vtable slot offset of the field at `index`.
fn slot(index: usize) -> u32 {
    4 + 2 * index as u32
}

/// Discriminant type accompanying a union or vector-of-union field.
fn union_tag(ty: &Type) -> Option<Type> {
    match ty {
        Type::Union(id) => Some(Type::UnionType(*id)),
        Type::Vector(element) => match element.as_ref() {
            Type::Union(id) => Some(Type::Vector(Box::new(Type::UnionType(*id)))),
            _ => None,
        },
        _ => None,
    }
}

fn underlying(decl: &EnumDecl) -> Result<Scalar> {
    Scalar::from_keyword(&decl.underlying)
        .filter(Scalar::is_integer)
        .ok_or_else(|| {
            eyre!(
                "enum '{}' has a non-integer underlying type '{}'",
                decl.name,
                decl.underlying
            )
        })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn lower(content: &str) -> Schema {
        let manifest = Manifest::from_str(content).expect("Failed to parse test manifest");
        lower_manifest(&manifest).expect("lowering should succeed")
    }

    #[test]
    fn test_table_slots_and_defaults() {
        let schema = lower(
            r#"
            [[enums]]
            name = "Color"
            values = [{ name = "Red", value = 1 }, { name = "Blue", value = 8 }]

            [[tables]]
            name = "Monster"
            fields = [
                { name = "hp", type = "short", default = 100 },
                { name = "friendly", type = "bool", default = true },
                { name = "color", type = "Color", default = "Blue" },
                { name = "name", type = "string" },
            ]
            "#,
        );

        let monster = &schema.structs[0];
        let offsets: Vec<u32> = monster.fields.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, [4, 6, 8, 10]);

        let defaults: Vec<&str> = monster.fields.iter().map(|f| f.default.as_str()).collect();
        assert_eq!(defaults, ["100", "1", "8", "0"]);

        assert_eq!(
            monster.fields[2].ty,
            Type::Scalar {
                scalar: Scalar::UInt8,
                enum_def: Some(EnumId(0)),
            }
        );
    }

    #[test]
    fn test_union_lowering() {
        let schema = lower(
            r#"
            [[enums]]
            name = "Color"
            values = []

            [[unions]]
            name = "Any"
            members = [{ name = "Monster" }, { name = "Label", type = "string" }]

            [[tables]]
            name = "Monster"
            fields = [
                { name = "test", type = "Any" },
                { name = "tests", type = "[Any]", deprecated = true },
            ]
            "#,
        );

        let any = &schema.enums[1];
        assert!(any.is_union);
        let names: Vec<&str> = any.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["NONE", "Monster", "Label"]);
        assert_eq!(any.values[1].union_type, Some(Type::Struct(StructId(0))));
        assert_eq!(any.values[2].union_type, Some(Type::String));

        let monster = &schema.structs[0];
        let names: Vec<&str> = monster.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["test_type", "test", "tests_type", "tests"]);
        assert_eq!(monster.fields[0].ty, Type::UnionType(EnumId(1)));
        assert_eq!(monster.fields[1].offset, 6);
        assert_eq!(
            monster.fields[2].ty,
            Type::Vector(Box::new(Type::UnionType(EnumId(1))))
        );
        assert!(monster.fields[2].deprecated);
    }

    #[test]
    fn test_declared_companion_is_kept() {
        let schema = lower(
            r#"
            [[unions]]
            name = "Any"
            members = [{ name = "Monster" }]

            [[tables]]
            name = "Monster"
            fields = [
                { name = "test_type", type = "ubyte", offset = 18 },
                { name = "test", type = "Any", offset = 20 },
            ]
            "#,
        );

        let monster = &schema.structs[0];
        assert_eq!(monster.fields.len(), 2);
        assert_eq!(monster.fields[0].ty, Type::UnionType(EnumId(0)));
        assert_eq!(monster.fields[0].offset, 18);
        assert_eq!(monster.fields[1].offset, 20);
    }

    #[test]
    fn test_structs_precede_tables() {
        let schema = lower(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "pos", type = "Vec3" }]

            [[structs]]
            name = "Vec3"
            minalign = 4
            bytesize = 12
            fields = [
                { name = "x", type = "float", offset = 0 },
                { name = "y", type = "float", offset = 4 },
                { name = "z", type = "float", offset = 8 },
            ]
            "#,
        );

        assert!(schema.structs[0].fixed);
        assert_eq!(schema.structs[0].name, "Vec3");
        assert!(!schema.structs[1].fixed);
        assert_eq!(schema.structs[1].fields[0].ty, Type::Struct(StructId(0)));
    }

    #[test]
    fn test_unknown_type_fails() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "weapon", type = "Weapon" }]
            "#,
        )
        .unwrap();

        let err = lower_manifest(&manifest).unwrap_err();
        assert!(err.to_string().contains("unknown type 'Weapon'"));
    }
}
