//! Naming conventions for target languages.

/// Language-specific naming conventions.
///
/// Defines how schema names become type, method, and parameter names, and how
/// reserved words are escaped. Reserved words are checked against the raw
/// schema name before any case transformation.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a definition name to a type name
    pub definition_to_type: fn(&str) -> String,
    /// Transform a field name to an accessor method name (e.g., "test_type" -> "TestType")
    pub field_to_method: fn(&str) -> String,
    /// Transform a field name to a parameter name (e.g., "test_type" -> "testType")
    pub field_to_param: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "end" -> "_end" in Lua)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Escape, then transform for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        (self.definition_to_type)(&self.safe_name(name))
    }

    /// Escape, then transform for use as a method name.
    pub fn method_name(&self, name: &str) -> String {
        (self.field_to_method)(&self.safe_name(name))
    }

    /// Escape, then transform for use as a parameter name.
    pub fn param_name(&self, name: &str) -> String {
        (self.field_to_param)(&self.safe_name(name))
    }
}
