//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating FlatBuffers bindings
/// in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "lua")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "lua")
    fn file_extension(&self) -> &'static str;

    /// Render generated files without writing to disk
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, relative to the output directory
    pub written: Vec<String>,
    /// Files left untouched because they already existed
    pub skipped: Vec<String>,
}

impl GenerateResult {
    /// Total number of files considered.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
