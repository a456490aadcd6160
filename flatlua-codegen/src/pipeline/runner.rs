//! Pipeline orchestrator.

use eyre::Result;
use flatlua_manifest::Manifest;

use super::{
    CompilationContext, Phase,
    phases::{Lint, LowerPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (lower, validate) followed by any user phases.
/// Generators add their own lints (for instance, reserved-word checks) with
/// [`Pipeline::lint`].
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .lint(EscapedIdentifierLint::new(LUA_NAMING))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(manifest)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a new pipeline with the default lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
        }
    }

    /// Add a lint to the validate phase.
    pub fn lint(mut self, lint: impl Lint + 'static) -> Self {
        self.validate = self.validate.with_lint(lint);
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Names of the lints the validate phase will run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.validate.lint_names()
    }

    /// Run the pipeline on a manifest.
    ///
    /// Executes all phases in order:
    /// 1. LowerPhase - resolves the manifest into a schema
    /// 2. ValidatePhase - runs lints, collects diagnostics
    /// 3. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);

        let builtin: [&dyn Phase; 2] = [&LowerPhase, &self.validate];
        for phase in builtin
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
        {
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
