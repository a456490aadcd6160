//! Resolved schema representation for the flatlua generator.
//!
//! This crate provides the schema AST consumed by code generators: struct and
//! table definitions with their computed layout, enums, unions, and the field
//! types that connect them.
//!
//! # Architecture
//!
//! ```text
//! schema.toml (TOML) → flatlua-manifest (parsing) → flatlua-ir (resolved schema) → codegen
//! ```
//!
//! The IR is read-only during generation. Definitions reference each other
//! through typed indices ([`StructId`], [`EnumId`]) into the [`Schema`] arenas.

mod options;
mod schema;
mod types;

pub use flatlua_core::Scalar;
pub use options::GenerateOptions;
pub use schema::{Definition, EnumDef, EnumVal, FieldDef, Schema, StructDef};
pub use types::{EnumId, StructId, Type};
