//! Generate operation - manifest to Lua modules.

use std::path::Path;

use eyre::{Context, Result};
use flatlua_codegen_lua::{Generator, LanguageCodegen};
use flatlua_manifest::Manifest;
use tracing::debug;

use crate::reports::{Definitions, GenerateReport, GenerationResult};

/// What to generate and where.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub output: &'a Path,
    pub dry_run: bool,
    /// Force the object-based API on, whatever `[options]` says.
    pub object_api: bool,
    /// Force empty mirror vectors to nil, whatever `[options]` says.
    pub empty_vectors_nil: bool,
}

/// Execute the generate operation.
///
/// Runs the pipeline, applies the command-line option overrides, then
/// either writes the modules or renders them for preview.
pub fn generate(manifest: &Manifest, request: GenerateRequest<'_>) -> Result<GenerateReport> {
    let mut ctx = super::pipeline()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;

    ctx.options.generate_object_based_api |= request.object_api;
    ctx.options.set_empty_vectors_to_null |= request.empty_vectors_nil;
    debug!(options = ?ctx.options, "resolved generator options");

    let warnings = ctx.warnings().map(|d| d.message.clone()).collect();
    let generator = Generator::from_context(&ctx)?;

    let result = if request.dry_run {
        GenerationResult::Preview {
            files: generator.preview().wrap_err("Failed to render modules")?,
        }
    } else {
        let written = generator
            .generate(request.output)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written {
            output_dir: request.output.to_path_buf(),
            files: written.written,
        }
    };

    Ok(GenerateReport {
        warnings,
        definitions: Definitions::of(manifest),
        object_api: ctx.options.generate_object_based_api,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const SCHEMA: &str = r#"
        [[enums]]
        name = "Color"
        namespace = ["MyGame"]
        values = [{ name = "Red", value = 0 }]

        [[tables]]
        name = "Monster"
        namespace = ["MyGame"]
        fields = [{ name = "color", type = "Color" }, { name = "tags", type = "[string]" }]
    "#;

    fn request(output: &Path) -> GenerateRequest<'_> {
        GenerateRequest {
            output,
            dry_run: false,
            object_api: false,
            empty_vectors_nil: false,
        }
    }

    #[test]
    fn test_generate_writes_modules() {
        let temp = tempfile::tempdir().unwrap();
        let manifest = Manifest::from_str(SCHEMA).unwrap();

        let report = generate(&manifest, request(temp.path())).unwrap();
        let GenerationResult::Written { files, .. } = &report.result else {
            panic!("expected written files");
        };

        assert_eq!(files, &["MyGame/Color.lua", "MyGame/Monster.lua"]);
        assert_eq!(report.definitions.total(), 2);
        let monster = std::fs::read_to_string(temp.path().join("MyGame/Monster.lua")).unwrap();
        assert!(!monster.contains("function Monster.Pack"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let manifest = Manifest::from_str(SCHEMA).unwrap();

        let report = generate(
            &manifest,
            GenerateRequest {
                dry_run: true,
                ..request(temp.path())
            },
        )
        .unwrap();

        assert!(matches!(report.result, GenerationResult::Preview { ref files } if files.len() == 2));
        assert!(!temp.path().join("MyGame").exists());
    }

    #[test]
    fn test_flags_override_options() {
        let temp = tempfile::tempdir().unwrap();
        let manifest = Manifest::from_str(SCHEMA).unwrap();

        let report = generate(
            &manifest,
            GenerateRequest {
                object_api: true,
                empty_vectors_nil: true,
                ..request(temp.path())
            },
        )
        .unwrap();

        assert!(report.object_api);
        let monster = std::fs::read_to_string(temp.path().join("MyGame/Monster.lua")).unwrap();
        assert!(monster.contains("function Monster.Pack(builder, o)"));
        assert!(monster.contains("    o.Tags = nil\n"));
    }
}
