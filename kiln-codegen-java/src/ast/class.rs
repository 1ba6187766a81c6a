//! Java class builder.

use kiln_codegen::builder::{CodeFragment, Renderable};

/// A top level class with a javadoc, annotations and members separated
/// by blank lines.
#[derive(Debug, Clone)]
pub struct JavaClass {
    declaration: String,
    javadoc: Vec<String>,
    annotations: Vec<String>,
    members: Vec<Vec<CodeFragment>>,
}

impl JavaClass {
    /// A class with the full declaration, e.g.
    /// `public class FooConfigurer extends Base implements Api`.
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            javadoc: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn javadoc(mut self, line: impl Into<String>) -> Self {
        self.javadoc.push(line.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Add a member: a field group, a static block or a method.
    pub fn member(mut self, node: &impl Renderable) -> Self {
        self.members.push(node.to_fragments());
        self
    }
}

impl Renderable for JavaClass {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if !self.javadoc.is_empty() {
            fragments.push(CodeFragment::JavaDoc(self.javadoc.clone()));
        }
        fragments.extend(
            self.annotations
                .iter()
                .map(|a| CodeFragment::Line(format!("@{}", a))),
        );

        let mut body = Vec::new();
        for member in &self.members {
            body.push(CodeFragment::Blank);
            body.extend(member.iter().cloned());
        }
        fragments.push(CodeFragment::block(format!("{} {{", self.declaration), body));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use kiln_codegen::builder::CodeBuilder;

    use super::*;
    use crate::ast::Method;

    #[test]
    fn test_members_are_separated() {
        let class = JavaClass::new("public class Foo")
            .javadoc("Foo.")
            .annotation("SuppressWarnings(\"unchecked\")")
            .member(&CodeFragment::line("private int a;"))
            .member(&Method::new("public int a()").line("return a;"));
        let code = CodeBuilder::java().render(&class).build();
        assert_eq!(
            code,
            "/**\n * Foo.\n */\n@SuppressWarnings(\"unchecked\")\npublic class Foo {\n\n    private int a;\n\n    public int a() {\n        return a;\n    }\n}\n"
        );
    }
}
