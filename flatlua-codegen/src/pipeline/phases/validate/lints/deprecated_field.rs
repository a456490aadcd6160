//! Lint for deprecated fields.

use flatlua_ir::{Definition, Schema};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that reports deprecated fields, which get no accessor or builder.
pub struct DeprecatedFieldLint;

impl Lint for DeprecatedFieldLint {
    fn name(&self) -> &'static str {
        "deprecated-field"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for def in &schema.structs {
            for field in def.fields.iter().filter(|f| f.deprecated) {
                let owner = def.qualified_name();
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!(
                            "field '{}' is deprecated and will not be generated",
                            field.name
                        ),
                    )
                    .at(format!("{}.{}", owner, field.name)),
                );
            }
        }
    }
}
