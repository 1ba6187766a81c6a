//! Java method builder.

use kiln_codegen::builder::{CodeFragment, Renderable};

/// Builder for a Java method.
#[derive(Debug, Clone)]
pub struct Method {
    annotations: Vec<String>,
    signature: String,
    body: Vec<CodeFragment>,
}

impl Method {
    /// A method with the full signature, e.g.
    /// `public boolean isEnabled(String scheme)`.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            signature: signature.into(),
            body: Vec::new(),
        }
    }

    /// Shorthand for an `@Override` method.
    pub fn overriding(signature: impl Into<String>) -> Self {
        Self::new(signature).annotation("Override")
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Add a line to the method body.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    /// Add a blank line to the method body.
    pub fn blank(mut self) -> Self {
        self.body.push(CodeFragment::Blank);
        self
    }

    /// Add a rendered node to the method body.
    pub fn push(mut self, node: &impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .annotations
            .iter()
            .map(|a| CodeFragment::Line(format!("@{}", a)))
            .collect();
        fragments.push(CodeFragment::block(
            format!("{} {{", self.signature),
            self.body.clone(),
        ));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use kiln_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_override_method() {
        let method = Method::overriding("public boolean isLenientProperties()").line("return false;");
        let code = CodeBuilder::java().render(&method).build();
        assert_eq!(
            code,
            "@Override\npublic boolean isLenientProperties() {\n    return false;\n}\n"
        );
    }

    #[test]
    fn test_empty_body() {
        let code = CodeBuilder::java().render(&Method::new("public void close()")).build();
        assert_eq!(code, "public void close() {\n}\n");
    }
}
