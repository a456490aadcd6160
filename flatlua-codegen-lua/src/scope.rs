//! Per-unit emission state.

use flatlua_codegen::generation::ImportCollector;
use flatlua_ir::{GenerateOptions, Schema};

/// Module name of the FlatBuffers Lua runtime.
pub(crate) const RUNTIME: &str = "flatbuffers";

/// State shared by the emitters while one unit is being rendered.
///
/// Emitters call [`UnitScope::runtime`] whenever they reference the runtime
/// table, which is how the assembler knows whether the unit needs the
/// `require('flatbuffers')` line.
pub(crate) struct UnitScope<'a> {
    pub schema: &'a Schema,
    pub options: GenerateOptions,
    imports: ImportCollector,
}

impl<'a> UnitScope<'a> {
    pub fn new(schema: &'a Schema, options: GenerateOptions) -> Self {
        Self {
            schema,
            options,
            imports: ImportCollector::new(),
        }
    }

    /// Name of the runtime table, recording that the unit uses it.
    pub fn runtime(&mut self) -> &'static str {
        self.imports.add_module(RUNTIME);
        RUNTIME
    }

    pub fn into_imports(self) -> ImportCollector {
        self.imports
    }
}
