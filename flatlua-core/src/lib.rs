//! Core utilities and types for the flatlua generator.
//!
//! This crate provides fundamental types and utilities used across
//! the flatlua crates.

mod file;
mod scalar;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult};
// Fundamental types
pub use scalar::Scalar;
// String utilities
pub use utils::{make_camel, toml_value_to_string};
