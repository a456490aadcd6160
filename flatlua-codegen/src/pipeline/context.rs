//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use flatlua_ir::{GenerateOptions, Schema};
use flatlua_manifest::Manifest;

use super::diagnostic::{Diagnostic, Severity};

/// Context passed through all pipeline phases.
///
/// This struct carries the state of compilation through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// The original manifest being compiled.
    pub manifest: Manifest,
    /// Generator options, seeded from the manifest's `[options]`.
    pub options: GenerateOptions,
    /// The resolved schema (populated by LowerPhase).
    pub schema: Option<Schema>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from a manifest.
    pub fn new(manifest: Manifest) -> Self {
        let options = GenerateOptions {
            generate_object_based_api: manifest.options.object_api,
            set_empty_vectors_to_null: manifest.options.empty_vectors_nil,
        };
        Self {
            manifest,
            options,
            schema: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Borrow the resolved schema.
    ///
    /// # Errors
    ///
    /// Fails if LowerPhase has not run.
    pub fn schema(&self) -> Result<&Schema> {
        self.schema
            .as_ref()
            .ok_or_else(|| eyre!("schema not lowered - did LowerPhase run?"))
    }
}
