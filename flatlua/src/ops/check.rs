//! Check operation - manifest validation.

use std::path::Path;

use eyre::{Context, Result};
use flatlua_manifest::Manifest;

use crate::reports::{CheckReport, Definitions};

/// Execute the check operation.
///
/// Runs the pipeline to validate the manifest and returns its diagnostics.
pub fn check(manifest: &Manifest, schema_path: &Path) -> Result<CheckReport> {
    let ctx = super::pipeline()
        .run(manifest.clone())
        .wrap_err("Validation failed")?;

    Ok(CheckReport::new(
        schema_path.to_path_buf(),
        Definitions::of(manifest),
        ctx.diagnostics,
    ))
}
