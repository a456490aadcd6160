//! Indentation configuration for code generation.

/// One level of indentation in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// 4-space indentation, as written by `flatc --lua`.
    pub const LUA: Self = Self("    ");

    /// The text of one indent level.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}
