//! Validate phase - runs lints on the resolved schema.

mod lint;
pub mod lints;

use eyre::{Result, bail, eyre};
pub use lint::Lint;
pub use lints::{DeprecatedFieldLint, EmptyUnionLint, EscapedIdentifierLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the schema using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![Box::new(DeprecatedFieldLint), Box::new(EmptyUnionLint)],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check the schema and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let schema = ctx
            .schema
            .as_ref()
            .ok_or_else(|| eyre!("validate needs a lowered schema"))?;

        for lint in &self.lints {
            lint.check(schema, &mut ctx.diagnostics);
        }

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flatlua_ir::Schema;
    use flatlua_manifest::Manifest;

    use super::*;
    use crate::pipeline::{Diagnostic, phases::LowerPhase};

    fn lowered(content: &str) -> CompilationContext {
        let manifest: Manifest = toml::from_str(content).expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).expect("lowering should succeed");
        ctx
    }

    #[test]
    fn test_requires_schema() {
        let mut ctx = CompilationContext::new(Manifest::default());
        assert!(ValidatePhase::new().run(&mut ctx).is_err());
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn check(&self, _schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = lowered("");
        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);

        assert!(phase.run(&mut ctx).is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_allowed() {
        let mut ctx = lowered(
            r#"
            [[unions]]
            name = "Any"
        "#,
        );

        let phase = ValidatePhase::empty().with_lint(EmptyUnionLint);
        assert!(phase.run(&mut ctx).is_ok());
        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            ["deprecated-field", "empty-union"]
        );
    }
}
