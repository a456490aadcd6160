//! Import collection utilities.

use indexmap::IndexSet;

/// Tracks the modules a generated file requires.
///
/// Modules are deduplicated and kept in insertion order for deterministic
/// output.
///
/// # Example
///
/// ```
/// use flatlua_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("flatbuffers");
/// imports.add_module("flatbuffers");
///
/// let lines: Vec<String> = imports
///     .iter()
///     .map(|module| format!("local {0} = require('{0}')", module))
///     .collect();
/// assert_eq!(lines, ["local flatbuffers = require('flatbuffers')"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    modules: IndexSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a required module.
    pub fn add_module(&mut self, module: &str) {
        if !self.modules.contains(module) {
            self.modules.insert(module.to_string());
        }
    }

    /// Check if a module is already required.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    /// Iterate over the modules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_are_deduplicated() {
        let mut imports = ImportCollector::new();
        imports.add_module("flatbuffers");
        imports.add_module("flatbuffers");

        assert!(imports.has_module("flatbuffers"));
        assert!(!imports.has_module("MyGame.Vec3"));
        assert_eq!(imports.iter().count(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut imports = ImportCollector::new();
        imports.add_module("b");
        imports.add_module("a");
        let modules: Vec<&str> = imports.iter().collect();
        assert_eq!(modules, ["b", "a"]);
    }

    #[test]
    fn test_empty() {
        let imports = ImportCollector::new();
        assert!(imports.is_empty());
    }
}
