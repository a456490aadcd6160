use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use flatlua_manifest::SchemaToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to schema.toml (defaults to ./schema.toml)
    #[arg(short, long, default_value = "schema.toml")]
    pub schema: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let schema_toml = SchemaToml::open(&self.schema).unwrap_or_exit();
        let report = ops::check(schema_toml.manifest(), schema_toml.path())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.valid {
            std::process::exit(1);
        }

        Ok(())
    }
}
