//! Shared code generation utilities for the flatlua generator.
//!
//! This crate provides language-agnostic abstractions and utilities
//! used by language-specific code generators (e.g., `flatlua-codegen-lua`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output management (ImportCollector)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, NamingConvention)
//! - [`pipeline`] - Manifest lowering and validation with diagnostics
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod generation;
pub mod language;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
