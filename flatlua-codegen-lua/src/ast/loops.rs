//! Numeric `for` loops.

use flatlua_codegen::builder::{CodeFragment, Renderable};

/// A numeric `for` loop over 1-based indices.
#[derive(Debug, Clone)]
pub struct NumericFor {
    var: String,
    start: String,
    stop: String,
    step: Option<&'static str>,
    body: Vec<CodeFragment>,
}

impl NumericFor {
    /// `for var = 1, upper do`
    pub fn ascending(var: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            start: "1".to_string(),
            stop: upper.into(),
            step: None,
            body: Vec::new(),
        }
    }

    /// `for var = upper, 1, -1 do`
    pub fn descending(var: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            start: upper.into(),
            stop: "1".to_string(),
            step: Some("-1"),
            body: Vec::new(),
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
}

impl Renderable for NumericFor {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = match self.step {
            Some(step) => format!(
                "for {} = {}, {}, {} do",
                self.var, self.start, self.stop, step
            ),
            None => format!("for {} = {}, {} do", self.var, self.start, self.stop),
        };
        vec![CodeFragment::block(
            header,
            self.body.clone(),
            Some("end".to_string()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use flatlua_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_loop_headers() {
        let mut builder = CodeBuilder::lua();
        builder
            .emit(&NumericFor::ascending("_j", "length").line("o.Inventory[_j] = self:Inventory(_j)"))
            .emit(&NumericFor::descending("_j", "3").line("builder:PrependFloat32(pos[_j])"));
        assert_eq!(
            builder.build(),
            "for _j = 1, length do\n    o.Inventory[_j] = self:Inventory(_j)\nend\n\
             for _j = 3, 1, -1 do\n    builder:PrependFloat32(pos[_j])\nend\n"
        );
    }
}
