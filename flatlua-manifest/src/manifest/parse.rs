//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use flatlua_core::Scalar;

use super::{DeclRef, Manifest, TypeExpr, qualify, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "schema.toml")
    }
}

impl Manifest {
    /// Parse a schema.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a schema.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let mut seen = HashSet::new();
    for (decl, namespace, name) in manifest.declarations() {
        ctx.validate_name(name, decl.kind())?;
        for segment in namespace {
            ctx.validate_name(segment, "namespace")?;
        }

        let qualified = qualify(namespace, name);
        if !seen.insert(qualified.clone()) {
            return Err(ctx.source_context().validation_error_at(
                format!("'{}' is declared more than once", qualified),
                ctx.find_span(name),
            ));
        }
    }

    for decl in &manifest.enums {
        let enum_ctx = ctx.push(&decl.name);
        match Scalar::from_keyword(&decl.underlying) {
            Some(scalar) if scalar.is_integer() => {}
            _ => {
                return Err(ctx.source_context().invalid_type_error(
                    &decl.underlying,
                    format!("the underlying type of enum '{}' must be an integer", decl.name),
                    ctx.find_span(&decl.underlying),
                ));
            }
        }

        let mut names = HashSet::new();
        for value in &decl.values {
            enum_ctx.validate_name(&value.name, "enum value")?;
            check_unique(&enum_ctx, &mut names, &value.name, "enum value")?;
        }
    }

    for decl in &manifest.unions {
        let union_ctx = ctx.push(&decl.name);
        let mut names = HashSet::new();
        let mut values = HashSet::new();

        for (member, value) in decl.members.iter().zip(decl.member_values()) {
            union_ctx.validate_name(&member.name, "union member")?;
            check_unique(&union_ctx, &mut names, &member.name, "union member")?;

            if member.name == "NONE" {
                return Err(ctx.source_context().validation_error_at(
                    format!(
                        "union member '{}.NONE' collides with the implicit NONE member",
                        decl.name
                    ),
                    ctx.find_span(&member.name),
                ));
            }
            if value == 0 {
                return Err(ctx.source_context().validation_error_at(
                    format!(
                        "union member '{}.{}' cannot use value 0, it is reserved for NONE",
                        decl.name, member.name
                    ),
                    ctx.find_span(&member.name),
                ));
            }
            // discriminants are stored as a ubyte
            if !(1..=255).contains(&value) {
                return Err(ctx.source_context().validation_error_at(
                    format!(
                        "union member '{}.{}' has value {}, discriminants must be in 1..=255",
                        decl.name, member.name, value
                    ),
                    ctx.find_span(&member.name),
                ));
            }
            if !values.insert(value) {
                return Err(ctx.source_context().validation_error_at(
                    format!(
                        "union member '{}.{}' reuses value {}",
                        decl.name, member.name, value
                    ),
                    ctx.find_span(&member.name),
                ));
            }

            let payload = member.payload();
            if payload == "string" {
                continue;
            }
            match manifest.resolve(&decl.namespace, payload) {
                Some(DeclRef::Table(_) | DeclRef::Struct(_)) => {}
                Some(other) => {
                    return Err(ctx.source_context().validation_error_at(
                        format!(
                            "union member '{}.{}' must hold a table, a struct or a string, found {} '{}'",
                            decl.name,
                            member.name,
                            other.kind(),
                            payload
                        ),
                        ctx.find_span(payload),
                    ));
                }
                None => {
                    return Err(ctx.source_context().unknown_type_error(
                        payload,
                        format!("union '{}'", decl.name),
                        ctx.find_span(payload),
                    ));
                }
            }
        }
    }

    for decl in &manifest.structs {
        let struct_ctx = ctx.push(&decl.name);
        let mut names = HashSet::new();
        for field in &decl.fields {
            struct_ctx.validate_name(&field.name, "field")?;
            check_unique(&struct_ctx, &mut names, &field.name, "field")?;
            check_type(
                manifest,
                &ctx,
                &decl.namespace,
                &field.ty,
                &format!("struct '{}'", decl.name),
            )?;
        }
    }

    for decl in &manifest.tables {
        let table_ctx = ctx.push(&decl.name);
        let mut names = HashSet::new();
        for field in &decl.fields {
            table_ctx.validate_name(&field.name, "field")?;
            check_unique(&table_ctx, &mut names, &field.name, "field")?;
            let ty = check_type(
                manifest,
                &ctx,
                &decl.namespace,
                &field.ty,
                &format!("table '{}'", decl.name),
            )?;

            if let Some(toml::Value::String(member)) = &field.default {
                check_enum_default(manifest, &ctx, &decl.namespace, &ty, &field.name, member)?;
            }
        }
    }

    Ok(())
}

fn check_unique<'a>(
    ctx: &ParseContext<'_>,
    seen: &mut HashSet<&'a str>,
    name: &'a str,
    kind: &str,
) -> Result<()> {
    if !seen.insert(name) {
        return Err(ctx.source_context().validation_error_at(
            format!("duplicate {} '{}'", ctx.context_for(kind), name),
            ctx.find_span(name),
        ));
    }
    Ok(())
}

/// Parse a field type and make sure every name it mentions is declared.
fn check_type(
    manifest: &Manifest,
    ctx: &ParseContext<'_>,
    namespace: &[String],
    ty: &str,
    owner: &str,
) -> Result<TypeExpr> {
    let expr: TypeExpr = ty.parse().map_err(|reason: String| {
        ctx.source_context()
            .invalid_type_error(ty, reason, ctx.find_span(ty))
    })?;

    if let TypeExpr::Named(name) = expr.innermost() {
        if manifest.resolve(namespace, name).is_none() {
            return Err(ctx
                .source_context()
                .unknown_type_error(name, owner, ctx.find_span(name)));
        }
    }

    Ok(expr)
}

/// A string default must name a member of the field's enum.
fn check_enum_default(
    manifest: &Manifest,
    ctx: &ParseContext<'_>,
    namespace: &[String],
    ty: &TypeExpr,
    field: &str,
    member: &str,
) -> Result<()> {
    let found = match ty {
        TypeExpr::Named(name) => match manifest.resolve(namespace, name) {
            Some(DeclRef::Enum(idx)) => Some(&manifest.enums[idx]),
            _ => None,
        },
        _ => None,
    };

    let Some(decl) = found else {
        return Err(ctx.source_context().validation_error_at(
            format!(
                "field '{}' has a named default '{}' but is not an enum",
                field, member
            ),
            ctx.find_span(member),
        ));
    };

    if decl.values.iter().any(|v| v.name == member) {
        Ok(())
    } else {
        Err(ctx.source_context().validation_error_at(
            format!("'{}' is not a member of enum '{}'", member, decl.name),
            ctx.find_span(member),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(content: &str) -> Box<Error> {
        Manifest::from_str(content).expect_err("manifest should be rejected")
    }

    #[test]
    fn test_parse_valid_manifest() {
        let manifest: Manifest = r#"
            [options]
            object_api = true

            [[enums]]
            name = "Color"
            namespace = ["MyGame"]
            values = [{ name = "Red", value = 1 }, { name = "Blue", value = 2 }]

            [[tables]]
            name = "Monster"
            namespace = ["MyGame"]
            fields = [
                { name = "color", type = "Color", default = "Blue" },
                { name = "name", type = "string" },
                { name = "inventory", type = "[ubyte]" },
            ]
        "#
        .parse()
        .unwrap();

        assert!(manifest.options.object_api);
        assert_eq!(manifest.tables[0].fields.len(), 3);
    }

    #[test]
    fn test_unknown_type() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "weapon", type = "Weapon" }]
            "#,
        );
        assert!(matches!(*err, Error::UnknownType { ref ty, .. } if ty == "Weapon"));
    }

    #[test]
    fn test_invalid_type_syntax() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "pos", type = "[float:x]" }]
            "#,
        );
        assert!(matches!(*err, Error::InvalidType { .. }));
    }

    #[test]
    fn test_invalid_identifier() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "hit-points", type = "int" }]
            "#,
        );
        assert!(matches!(*err, Error::InvalidIdentifier { ref name, .. } if name == "hit-points"));
    }

    #[test]
    fn test_duplicate_declaration() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"

            [[structs]]
            name = "Monster"
            minalign = 1
            bytesize = 1
            fields = [{ name = "a", type = "ubyte", offset = 0 }]
            "#,
        );
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"
            fields = [{ name = "hp", type = "int" }, { name = "hp", type = "short" }]
            "#,
        );
        assert!(err.to_string().contains("duplicate field in 'Monster' 'hp'"));
    }

    #[test]
    fn test_union_rejects_zero_and_non_tables() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"

            [[unions]]
            name = "Any"
            members = [{ name = "Monster", value = 0 }]
            "#,
        );
        assert!(err.to_string().contains("reserved for NONE"));

        let err = parse_err(
            r#"
            [[enums]]
            name = "Color"
            values = []

            [[unions]]
            name = "Any"
            members = [{ name = "Color" }]
            "#,
        );
        assert!(err.to_string().contains("must hold a table, a struct or a string"));
    }

    #[test]
    fn test_union_accepts_struct_members() {
        let manifest: Manifest = r#"
            [[structs]]
            name = "Vec2"
            minalign = 4
            bytesize = 8
            fields = [
                { name = "x", type = "float", offset = 0 },
                { name = "y", type = "float", offset = 4 },
            ]

            [[unions]]
            name = "Shape"
            members = [{ name = "Vec2" }]
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.unions[0].members.len(), 1);
    }

    #[test]
    fn test_union_member_named_none() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "NONE"

            [[unions]]
            name = "Any"
            members = [{ name = "NONE" }]
            "#,
        );
        assert!(err.to_string().contains("collides with the implicit NONE member"));
    }

    #[test]
    fn test_union_value_out_of_range() {
        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"

            [[unions]]
            name = "Any"
            members = [{ name = "Monster", value = 256 }]
            "#,
        );
        assert!(err.to_string().contains("discriminants must be in 1..=255"));

        let err = parse_err(
            r#"
            [[tables]]
            name = "Monster"

            [[unions]]
            name = "Any"
            members = [{ name = "Monster", value = -1 }]
            "#,
        );
        assert!(err.to_string().contains("discriminants must be in 1..=255"));
    }

    #[test]
    fn test_enum_underlying_must_be_integer() {
        let err = parse_err(
            r#"
            [[enums]]
            name = "Color"
            underlying = "float"
            "#,
        );
        assert!(matches!(*err, Error::InvalidType { .. }));
    }

    #[test]
    fn test_named_default_must_be_member() {
        let err = parse_err(
            r#"
            [[enums]]
            name = "Color"
            values = [{ name = "Red", value = 1 }]

            [[tables]]
            name = "Monster"
            fields = [{ name = "color", type = "Color", default = "Green" }]
            "#,
        );
        assert!(err.to_string().contains("'Green' is not a member of enum 'Color'"));
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = parse_err("[[tables]\nname = 1");
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }
}
