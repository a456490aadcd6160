use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use flatlua_manifest::SchemaToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateRequest},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to schema.toml (defaults to ./schema.toml)
    #[arg(short, long, default_value = "schema.toml")]
    pub schema: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Generate the object-based API (overrides schema.toml)
    #[arg(long)]
    pub object_api: bool,

    /// Default empty mirror vectors to nil (overrides schema.toml)
    #[arg(long)]
    pub empty_vectors_nil: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let schema_toml = SchemaToml::open(&self.schema).unwrap_or_exit();

        let report = ops::generate(
            schema_toml.manifest(),
            GenerateRequest {
                output: &self.output,
                dry_run: self.dry_run,
                object_api: self.object_api,
                empty_vectors_nil: self.empty_vectors_nil,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
