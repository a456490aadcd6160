//! Check command report data structures.

use std::path::PathBuf;

use flatlua_codegen::pipeline::{Diagnostic, Severity};
use flatlua_manifest::Manifest;
use serde::Serialize;

use super::output::{Output, Report};

/// Number of declarations of each kind in a manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Definitions {
    pub enums: usize,
    pub unions: usize,
    pub structs: usize,
    pub tables: usize,
}

impl Definitions {
    pub fn of(manifest: &Manifest) -> Self {
        Self {
            enums: manifest.enums.len(),
            unions: manifest.unions.len(),
            structs: manifest.structs.len(),
            tables: manifest.tables.len(),
        }
    }

    /// One module is generated per definition.
    pub fn total(&self) -> usize {
        self.enums + self.unions + self.structs + self.tables
    }

    /// `2 enums, 1 union, 0 structs, 3 tables`
    pub fn summary(&self) -> String {
        [
            (self.enums, "enum"),
            (self.unions, "union"),
            (self.structs, "struct"),
            (self.tables, "table"),
        ]
        .iter()
        .map(|(count, kind)| plural(*count, kind))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Report data from manifest validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the schema file.
    pub schema_path: PathBuf,
    /// Whether the check passed (no errors).
    pub valid: bool,
    pub definitions: Definitions,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn new(schema_path: PathBuf, definitions: Definitions, diagnostics: Vec<Diagnostic>) -> Self {
        let valid = !diagnostics.iter().any(|d| d.severity.is_error());
        Self {
            schema_path,
            valid,
            definitions,
            diagnostics,
        }
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        let mut flagged = false;
        for diag in &self.diagnostics {
            let mut line = format!("{}: {}", diag.severity, diag.message);
            if let Some(loc) = &diag.location {
                line.push_str(&format!("\n  --> {}", loc));
            }
            match diag.severity {
                Severity::Error | Severity::Warning => {
                    flagged = true;
                    out.warning(&line);
                }
                Severity::Info => out.preformatted(&line),
            }
        }

        if flagged {
            out.newline();
        }

        if self.valid {
            out.preformatted(&format!("✓ {} is valid", self.schema_path.display()));
            out.newline();
            out.preformatted(&format!("  {}", self.definitions.summary()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_summary_pluralizes() {
        let defs = Definitions {
            enums: 1,
            unions: 0,
            structs: 2,
            tables: 1,
        };
        assert_eq!(defs.summary(), "1 enum, 0 unions, 2 structs, 1 table");
        assert_eq!(defs.total(), 4);
    }

    #[test]
    fn test_render_valid_report() {
        let report = CheckReport::new(
            PathBuf::from("schema.toml"),
            Definitions {
                tables: 1,
                ..Default::default()
            },
            vec![Diagnostic::warning("validate", "union 'Any' has no members").at("Any")],
        );
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(report.valid);
        assert_eq!(
            out.lines,
            [
                "stderr: warning: union 'Any' has no members\n  --> Any",
                "",
                "✓ schema.toml is valid",
                "",
                "  0 enums, 0 unions, 0 structs, 1 table",
            ]
        );
    }

    #[test]
    fn test_errors_make_report_invalid() {
        let report = CheckReport::new(
            PathBuf::from("schema.toml"),
            Definitions::default(),
            vec![Diagnostic::error("validate", "broken")],
        );
        assert!(!report.valid);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["diagnostics"][0]["severity"], "error");
        assert!(json["diagnostics"][0].get("location").is_none());
    }
}
