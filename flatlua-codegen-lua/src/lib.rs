//! Lua code generator for flatlua.
//!
//! This crate turns a resolved FlatBuffers [`Schema`](flatlua_ir::Schema) into
//! Lua modules that read and build buffers through the `flatbuffers` Lua
//! runtime.
//!
//! # Usage
//!
//! ```ignore
//! use flatlua_codegen::pipeline::Pipeline;
//! use flatlua_codegen_lua::{Generator, LanguageCodegen};
//! use flatlua_manifest::Manifest;
//! use std::path::Path;
//!
//! let manifest = Manifest::from_file("schema.toml")?;
//! let ctx = Pipeline::new().run(manifest)?;
//! let generator = Generator::from_context(&ctx)?;
//!
//! // Preview files without writing
//! let files = generator.preview()?;
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("out"))?;
//! ```
//!
//! # Generated Output
//!
//! One module per definition, at `<namespace>/<Name>.lua`:
//!
//! - enums and unions become name → value tables (unions also carry a
//!   discriminant → class table when the object API is enabled)
//! - structs and tables get a constructor, an `Init`, one accessor per field,
//!   and either a `Create<Name>` function or `Start`/`Add<Field>`/`End`
//!   builders
//! - with the object API, every struct and table also gets a plain-data
//!   mirror (`T`), `UnPack`/`UnPackTo`, and `Pack`

mod accessor;
mod builder;
mod enums;
mod error;
mod generator;
mod module;
mod naming;
mod object_api;
mod scope;
mod types;

#[cfg(test)]
mod fixtures;

pub mod ast;

pub use error::{Error, Result};
pub use flatlua_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::Generator;
pub use module::LuaUnit;
pub use naming::{LUA_NAMING, internal_name, module_path, normalize, public_name};
