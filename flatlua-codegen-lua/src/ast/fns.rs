//! Lua function builder.

use flatlua_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for Lua functions.
///
/// Functions render as a `function ... end` block. Single-statement builders
/// can be collapsed onto one line with [`LuaFn::inline`].
#[derive(Debug, Clone)]
pub struct LuaFn {
    name: String,
    doc: Vec<String>,
    params: Vec<String>,
    body: Vec<CodeFragment>,
    inline: bool,
}

impl LuaFn {
    /// A function named `Monster.New` or, for methods, `Monster_mt:Hp`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            params: Vec::new(),
            body: Vec::new(),
            inline: false,
        }
    }

    pub fn doc<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.doc
            .extend(lines.iter().map(|l| l.as_ref().to_string()));
        self
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn params<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a line to the function body.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add any renderable node to the function body.
    pub fn push(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    /// Render as `function name(params) <body> end` on a single line.
    ///
    /// Bodies holding anything besides plain lines still render as a block.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    fn signature(&self) -> String {
        format!("function {}({})", self.name, self.params.join(", "))
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::lua();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for LuaFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = CodeFragment::comments(&self.doc);

        let lines: Option<Vec<&str>> = self
            .body
            .iter()
            .map(|fragment| match fragment {
                CodeFragment::Line(line) => Some(line.as_str()),
                _ => None,
            })
            .collect();

        match lines {
            Some(lines) if self.inline => fragments.push(CodeFragment::line(format!(
                "{} {} end",
                self.signature(),
                lines.join(" ")
            ))),
            _ => fragments.push(CodeFragment::block(
                self.signature(),
                self.body.clone(),
                Some("end".to_string()),
            )),
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_fn() {
        let f = LuaFn::new("Monster.New")
            .line("local o = {}")
            .line("setmetatable(o, {__index = Monster_mt})")
            .line("return o")
            .build();
        assert_eq!(
            f,
            "function Monster.New()\n    local o = {}\n    setmetatable(o, {__index = Monster_mt})\n    return o\nend\n"
        );
    }

    #[test]
    fn test_inline_fn() {
        let f = LuaFn::new("Monster.End")
            .param("builder")
            .line("return builder:EndObject()")
            .inline()
            .build();
        assert_eq!(f, "function Monster.End(builder) return builder:EndObject() end\n");
    }

    #[test]
    fn test_inline_fn_with_block_body_renders_as_block() {
        let f = LuaFn::new("Monster.Check")
            .push(CodeFragment::block(
                "if o ~= 0 then",
                vec![CodeFragment::line("return o")],
                Some("end".to_string()),
            ))
            .inline()
            .build();
        assert_eq!(
            f,
            "function Monster.Check()\n    if o ~= 0 then\n        return o\n    end\nend\n"
        );
    }

    #[test]
    fn test_fn_with_doc() {
        let f = LuaFn::new("Vec3_mt:X").doc(&["the x coordinate"]).build();
        assert!(f.starts_with("-- the x coordinate\nfunction Vec3_mt:X()\n"));
    }

    #[test]
    fn test_params() {
        let f = LuaFn::new("Vec3.CreateVec3")
            .param("builder")
            .params(["x", "y", "z"])
            .build();
        assert!(f.starts_with("function Vec3.CreateVec3(builder, x, y, z)\n"));
    }
}
