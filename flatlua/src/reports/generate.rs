//! Generate command report data structures.

use std::path::PathBuf;

use flatlua_codegen_lua::PreviewFile;

use super::{
    Definitions,
    output::{Output, Report},
};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    pub definitions: Definitions,
    /// Whether the object-based API was generated.
    pub object_api: bool,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Modules were written under `output_dir`.
    Written {
        output_dir: PathBuf,
        files: Vec<String>,
    },
    /// Dry-run preview.
    Preview { files: Vec<PreviewFile> },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        match &self.result {
            GenerationResult::Written { output_dir, files } => {
                out.key_value("Schema", &self.definitions.summary());
                out.key_value("Object API", if self.object_api { "yes" } else { "no" });
                out.newline();

                out.section(&format!("Generated ({})", output_dir.display()));
                for file in files {
                    out.added_item(file);
                }
            }
            GenerationResult::Preview { files } => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }

                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
        }
    }
}
