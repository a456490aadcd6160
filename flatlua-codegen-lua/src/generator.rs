//! Lua code generator.

use std::path::Path;

use flatlua_codegen::{
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::CompilationContext,
};
use flatlua_core::{GeneratedFile, WriteResult};
use flatlua_ir::{GenerateOptions, Schema};
use tracing::{debug, info};

use crate::{
    Error, Result,
    module::{LuaUnit, enum_unit, struct_unit},
};

/// Lua code generator producing one module per definition.
pub struct Generator<'a> {
    schema: &'a Schema,
    options: GenerateOptions,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "lua"
    }

    fn file_extension(&self) -> &'static str {
        "lua"
    }

    fn preview(&self) -> eyre::Result<Vec<PreviewFile>> {
        Ok(self
            .render_units()?
            .into_iter()
            .map(|unit| PreviewFile {
                path: unit.relative_path().to_string(),
                content: unit.render(),
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> eyre::Result<GenerateResult> {
        Ok(self.generate_files(output_dir)?)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, options: GenerateOptions) -> Self {
        Self { schema, options }
    }

    /// Generator for the schema lowered by the pipeline, with its options.
    pub fn from_context(ctx: &'a CompilationContext) -> eyre::Result<Self> {
        Ok(Self::new(ctx.schema()?, ctx.options))
    }

    /// Render every definition: enums and unions first, then structs and tables.
    pub fn render_units(&self) -> Result<Vec<LuaUnit>> {
        let mut units = Vec::with_capacity(self.schema.enums.len() + self.schema.structs.len());

        for def in &self.schema.enums {
            let unit = enum_unit(self.schema, self.options, def)?;
            debug!(unit = unit.name(), path = unit.relative_path(), "rendered enum");
            units.push(unit);
        }
        for def in &self.schema.structs {
            let unit = struct_unit(self.schema, self.options, def)?;
            debug!(unit = unit.name(), path = unit.relative_path(), "rendered struct");
            units.push(unit);
        }

        Ok(units)
    }

    /// Write every unit under `output_dir`.
    ///
    /// Nothing is written unless every unit renders.
    fn generate_files(&self, output_dir: &Path) -> Result<GenerateResult> {
        let units = self.render_units()?;
        let mut result = GenerateResult::default();

        for unit in &units {
            let written = unit.write(output_dir).map_err(|source| Error::Write {
                path: unit.path(output_dir),
                source,
            })?;
            match written {
                WriteResult::Written => result.written.push(unit.relative_path().to_string()),
                WriteResult::Skipped => result.skipped.push(unit.relative_path().to_string()),
            }
        }

        info!(
            units = units.len(),
            output = %output_dir.display(),
            "generated lua modules"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_units_in_definition_order() {
        let schema = fixtures::monster_schema();
        let generator = Generator::new(&schema, GenerateOptions::default());
        let paths: Vec<String> = generator
            .render_units()
            .unwrap()
            .iter()
            .map(|u| u.relative_path().to_string())
            .collect();

        assert_eq!(
            paths,
            [
                "MyGame/Color.lua",
                "MyGame/Equipment.lua",
                "MyGame/Vec3.lua",
                "MyGame/Ability.lua",
                "MyGame/Monster.lua",
                "MyGame/Weapon.lua",
            ]
        );
    }

    #[test]
    fn test_preview_matches_render() {
        let schema = fixtures::monster_schema();
        let generator = Generator::new(&schema, GenerateOptions::default());
        let files = generator.preview().unwrap();

        assert_eq!(generator.language(), "lua");
        assert_eq!(files.len(), 6);
        assert!(files[0].content.contains("local Color = {"));
        assert!(files[4].content.ends_with("return Monster -- return the module\n"));
    }

    #[test]
    fn test_generate_writes_every_unit() {
        let temp = tempfile::tempdir().unwrap();
        let schema = fixtures::monster_schema();
        let generator = Generator::new(&schema, GenerateOptions::default());

        let result = generator.generate(temp.path()).unwrap();
        assert_eq!(result.written.len(), 6);
        assert!(result.skipped.is_empty());
        assert!(temp.path().join("MyGame").join("Monster.lua").exists());
    }

    #[test]
    fn test_generate_writes_nothing_on_invalid_schema() {
        let temp = tempfile::tempdir().unwrap();
        let mut schema = fixtures::monster_schema();
        // a table may not hold an inline array
        schema.structs[fixtures::WEAPON.0].fields.push(fixtures::field(
            "runes",
            flatlua_ir::Type::Array {
                element: Box::new(flatlua_ir::Type::scalar(flatlua_ir::Scalar::UInt8)),
                length: 4,
            },
            8,
        ));
        let generator = Generator::new(&schema, GenerateOptions::default());

        let err = generator.generate(temp.path()).unwrap_err();
        assert!(err.to_string().contains("arrays are only allowed in fixed structs"));
        assert!(!temp.path().join("MyGame").exists());
    }
}
