//! Lint trait for schema validation.

use flatlua_ir::Schema;

use crate::pipeline::Diagnostic;

/// A lint that checks the resolved schema for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the schema and add any diagnostics.
    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>);
}
