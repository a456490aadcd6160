//! Lint for names the target language reserves.

use flatlua_ir::{Definition, Schema};

use super::super::Lint;
use crate::{language::NamingConvention, pipeline::Diagnostic};

/// Lint that reports names a generator will rewrite because they are
/// reserved words in its target language.
pub struct EscapedIdentifierLint {
    naming: NamingConvention,
}

impl EscapedIdentifierLint {
    /// Create a lint for the given naming convention.
    pub fn new(naming: NamingConvention) -> Self {
        Self { naming }
    }

    fn report(&self, name: &str, location: String, diagnostics: &mut Vec<Diagnostic>) {
        if self.naming.is_reserved(name) {
            diagnostics.push(
                Diagnostic::info(
                    "validate",
                    format!(
                        "'{}' is a reserved word and will be emitted as '{}'",
                        name,
                        self.naming.safe_name(name)
                    ),
                )
                .at(location),
            );
        }
    }
}

impl Lint for EscapedIdentifierLint {
    fn name(&self) -> &'static str {
        "escaped-identifier"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for def in &schema.enums {
            let owner = def.qualified_name();
            self.report(&def.name, owner.clone(), diagnostics);
            for value in &def.values {
                self.report(&value.name, format!("{}.{}", owner, value.name), diagnostics);
            }
        }

        for def in &schema.structs {
            let owner = def.qualified_name();
            self.report(&def.name, owner.clone(), diagnostics);
            for field in &def.fields {
                self.report(&field.name, format!("{}.{}", owner, field.name), diagnostics);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flatlua_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::lower_manifest;

    fn same(s: &str) -> String {
        s.to_string()
    }

    fn underscore(s: &str) -> String {
        format!("_{}", s)
    }

    const NAMING: NamingConvention = NamingConvention {
        definition_to_type: same,
        field_to_method: same,
        field_to_param: same,
        reserved_words: &["end", "function"],
        escape_reserved: underscore,
    };

    #[test]
    fn test_reports_reserved_names() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[enums]]
            name = "Flow"
            values = [{ name = "end", value = 0 }]

            [[tables]]
            name = "function"
            fields = [{ name = "hp", type = "short" }]
        "#,
        )
        .unwrap();
        let schema = lower_manifest(&manifest).unwrap();

        let mut diagnostics = Vec::new();
        EscapedIdentifierLint::new(NAMING).check(&schema, &mut diagnostics);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].location.as_deref(), Some("Flow.end"));
        assert!(diagnostics[1].message.contains("'_function'"));
    }
}
