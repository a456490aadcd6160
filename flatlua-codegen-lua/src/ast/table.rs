//! Lua table constructor bound to a local.

use flatlua_codegen::builder::{CodeFragment, Renderable};

#[derive(Debug, Clone)]
struct Entry {
    doc: Vec<String>,
    key: String,
    value: String,
}

/// `local Name = { Key = value, ... }` with one entry per line.
#[derive(Debug, Clone)]
pub struct LuaTable {
    name: String,
    doc: Vec<String>,
    entries: Vec<Entry>,
}

impl LuaTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn doc<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.doc
            .extend(lines.iter().map(|l| l.as_ref().to_string()));
        self
    }

    /// Add `key = value,` preceded by its documentation comments.
    pub fn entry<S: AsRef<str>>(
        mut self,
        doc: &[S],
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entries.push(Entry {
            doc: doc.iter().map(|l| l.as_ref().to_string()).collect(),
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

impl Renderable for LuaTable {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for entry in &self.entries {
            body.extend(CodeFragment::comments(&entry.doc));
            body.push(CodeFragment::line(format!("{} = {},", entry.key, entry.value)));
        }

        let mut fragments = CodeFragment::comments(&self.doc);
        fragments.push(CodeFragment::block(
            format!("local {} = {{", self.name),
            body,
            Some("}".to_string()),
        ));
        fragments
    }
}
