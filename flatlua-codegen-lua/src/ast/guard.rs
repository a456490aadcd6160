//! Presence check around a table field read.

use flatlua_codegen::builder::{CodeFragment, Renderable};

/// Reads the vtable slot of a field once and branches on its presence.
///
/// ```text
/// local o = self.view:Offset(8)
/// if o ~= 0 then
///     <body>
/// end
/// return <fallback>
/// ```
#[derive(Debug, Clone)]
pub struct Guard {
    slot: u32,
    body: Vec<CodeFragment>,
    fallback: Option<String>,
}

impl Guard {
    pub fn new(slot: u32) -> Self {
        Self {
            slot,
            body: Vec::new(),
            fallback: None,
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    pub fn push(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    /// Value returned when the field is absent.
    pub fn otherwise(mut self, value: impl Into<String>) -> Self {
        self.fallback = Some(value.into());
        self
    }
}

impl Renderable for Guard {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = vec![
            CodeFragment::line(format!("local o = self.view:Offset({})", self.slot)),
            CodeFragment::block("if o ~= 0 then", self.body.clone(), Some("end".into())),
        ];
        if let Some(value) = &self.fallback {
            fragments.push(CodeFragment::line(format!("return {}", value)));
        }
        fragments
    }
}
