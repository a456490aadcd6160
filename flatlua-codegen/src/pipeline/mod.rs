//! Compilation pipeline for code generation.
//!
//! This module provides a [`Pipeline`] orchestrator that turns a parsed
//! manifest into a resolved [`Schema`](flatlua_ir::Schema). The pipeline provides:
//!
//! - Explicit phase boundaries (lower → validate)
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use flatlua_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//!
//! let generator = Generator::new(ctx.schema()?, ctx.options);
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
