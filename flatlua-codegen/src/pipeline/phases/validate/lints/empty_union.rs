//! Lint for unions without members.

use flatlua_ir::{Definition, Schema};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about unions that can only hold `NONE`.
pub struct EmptyUnionLint;

impl Lint for EmptyUnionLint {
    fn name(&self) -> &'static str {
        "empty-union"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for def in schema.enums.iter().filter(|e| e.is_union) {
            if def.values.iter().all(|v| v.is_zero()) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("union '{}' has no members besides NONE", def.name),
                    )
                    .at(def.qualified_name()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flatlua_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::lower_manifest;

    fn schema(content: &str) -> Schema {
        let manifest: Manifest = toml::from_str(content).expect("Failed to parse test manifest");
        lower_manifest(&manifest).unwrap()
    }

    #[test]
    fn test_empty_union() {
        let schema = schema(
            r#"
            [[unions]]
            name = "Any"
        "#,
        );

        let mut diagnostics = Vec::new();
        EmptyUnionLint.check(&schema, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert!(diagnostics[0].message.contains("'Any'"));
    }

    #[test]
    fn test_union_with_members() {
        let schema = schema(
            r#"
            [[unions]]
            name = "Any"
            members = [{ name = "Monster" }]

            [[tables]]
            name = "Monster"
        "#,
        );

        let mut diagnostics = Vec::new();
        EmptyUnionLint.check(&schema, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
