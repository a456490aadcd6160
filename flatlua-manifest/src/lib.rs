//! TOML manifest parsing for the flatlua generator.
//!
//! A manifest (`schema.toml`) describes an already-resolved FlatBuffers
//! schema: enums, unions, fixed structs with their layout, and tables. This
//! crate parses it, checks names and type references, and reports problems
//! as [`miette`] diagnostics pointing into the source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    DeclRef, EnumDecl, EnumValueDecl, Manifest, OptionsConfig, ParseContext, SchemaToml,
    StructDecl, StructFieldDecl, TableDecl, TableFieldDecl, TypeExpr, UnionDecl,
    UnionMemberDecl,
};
