//! One generated Lua module per schema definition.
//!
//! A unit is a list of body sections rendered with a blank line between
//! them, wrapped in the generated-file banner, the namespace comment, the
//! runtime `require` (only when the body references it), and the trailing
//! `return`.

use std::path::{Path, PathBuf};

use flatlua_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportCollector,
};
use flatlua_core::{FileRules, GeneratedFile};
use flatlua_ir::{Definition, EnumDef, GenerateOptions, Schema, StructDef};

use crate::{
    Result,
    accessor::emit_accessor,
    ast::LuaFn,
    builder::{emit_creator, emit_table_builders},
    enums::emit_enum,
    naming::{file_path, internal_name, public_name},
    object_api::emit_object_api,
    scope::{RUNTIME, UnitScope},
};

const BANNER: &str = "automatically generated by flatlua, do not modify";

/// A rendered Lua module, ready to preview or write.
#[derive(Debug, Clone)]
pub struct LuaUnit {
    path: String,
    name: String,
    namespace: String,
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl LuaUnit {
    fn new(def: &impl Definition, imports: ImportCollector) -> Self {
        Self {
            path: file_path(def),
            name: public_name(def),
            namespace: def.namespace().last().cloned().unwrap_or_default(),
            imports,
            body: Vec::new(),
        }
    }

    fn section(&mut self, node: impl Renderable) {
        self.body.push(node.to_fragments());
    }

    /// Output path relative to the output directory, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.path
    }

    /// Name of the module table the unit returns.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the unit loads the FlatBuffers runtime.
    pub fn requires_runtime(&self) -> bool {
        self.imports.has_module(RUNTIME)
    }
}

impl GeneratedFile for LuaUnit {
    fn path(&self, base: &Path) -> PathBuf {
        self.path
            .split('/')
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::lua();
        builder.push_comment(BANNER).push_blank();

        builder
            .push_comment(&format!("namespace: {}", self.namespace))
            .push_blank();

        for module in self.imports.iter() {
            builder.push_line(&format!("local {} = require('{}')", module, module));
        }
        if !self.imports.is_empty() {
            builder.push_blank();
        }

        for fragments in &self.body {
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            builder.push_blank();
        }

        builder.push_line(&format!("return {} -- return the module", self.name));
        builder.build()
    }
}

/// Module of an enum or union.
pub(crate) fn enum_unit(
    schema: &Schema,
    options: GenerateOptions,
    def: &EnumDef,
) -> Result<LuaUnit> {
    let scope = UnitScope::new(schema, options);
    let body = emit_enum(&scope, def)?;

    let mut unit = LuaUnit::new(def, scope.into_imports());
    unit.section(body);
    Ok(unit)
}

/// Module of a struct or table.
pub(crate) fn struct_unit(
    schema: &Schema,
    options: GenerateOptions,
    def: &StructDef,
) -> Result<LuaUnit> {
    let mut scope = UnitScope::new(schema, options);
    let name = public_name(def);
    let class = internal_name(def);
    let mut sections: Vec<Vec<CodeFragment>> = Vec::new();

    let mut prologue = CodeFragment::comments(&def.doc);
    prologue.push(CodeFragment::line(format!("local {} = {{}} -- the module", name)));
    prologue.push(CodeFragment::line(format!(
        "local {} = {{}} -- the class metatable",
        class
    )));
    sections.push(prologue);

    sections.push(
        LuaFn::new(format!("{}.New", name))
            .line("local o = {}")
            .line(format!("setmetatable(o, {{__index = {}}})", class))
            .line("return o")
            .to_fragments(),
    );

    if !def.fixed {
        let rt = scope.runtime();
        sections.push(
            LuaFn::new(format!("{}.GetRootAs{}", name, name))
                .params(["buf", "offset"])
                .line(format!("local n = {}.N.UOffsetT:Unpack(buf, offset)", rt))
                .line(format!("local o = {}.New()", name))
                .line("o:Init(buf, n + offset)")
                .line("return o")
                .to_fragments(),
        );
    }

    let rt = scope.runtime();
    sections.push(
        LuaFn::new(format!("{}:Init", class))
            .params(["buf", "pos"])
            .line(format!("self.view = {}.view.New(buf, pos)", rt))
            .to_fragments(),
    );

    for field in def.fields.iter().filter(|f| !f.deprecated) {
        for accessor in emit_accessor(&mut scope, def, field)? {
            sections.push(accessor.to_fragments());
        }
    }

    // one-line builders stay together
    if def.fixed {
        sections.push(emit_creator(schema, def)?.to_fragments());
    } else {
        let builders = emit_table_builders(schema, def)?;
        sections.push(builders.iter().flat_map(|f| f.to_fragments()).collect());
    }

    if options.generate_object_based_api {
        for f in emit_object_api(&scope, def)? {
            sections.push(f.to_fragments());
        }
    }

    let mut unit = LuaUnit::new(def, scope.into_imports());
    unit.body = sections;
    Ok(unit)
}
