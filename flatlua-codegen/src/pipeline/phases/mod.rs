//! Built-in pipeline phases.
//!
//! - [`LowerPhase`] - resolves the manifest into a `Schema`
//! - [`ValidatePhase`] - runs lints over the schema and collects diagnostics

mod lower;
mod validate;

pub use lower::{LowerPhase, lower_manifest};
pub use validate::{
    DeprecatedFieldLint, EmptyUnionLint, EscapedIdentifierLint, Lint, ValidatePhase,
};
