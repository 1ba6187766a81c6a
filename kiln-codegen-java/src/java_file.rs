//! JavaFile abstraction for structured Java source generation.

use kiln_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportCollector,
};
use kiln_core::GENERATED_MARKER;

/// A Java compilation unit: generated header, package, imports and
/// top level declarations.
///
/// # Example
///
/// ```
/// use kiln_codegen_java::{JavaFile, ast::JavaClass};
///
/// let source = JavaFile::new("org.acme")
///     .import("java.util.Map")
///     .add(&JavaClass::new("public class Foo"))
///     .render();
/// assert!(source.contains("package org.acme;\n\nimport java.util.Map;\n\npublic class Foo {\n}\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JavaFile {
    package: String,
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl JavaFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Import a type unless it is in this file's package or `java.lang`.
    pub fn import(mut self, fqcn: &str) -> Self {
        self.imports.add_for(&self.package, fqcn);
        self
    }

    pub fn imports<'a>(self, fqcns: impl IntoIterator<Item = &'a str>) -> Self {
        fqcns.into_iter().fold(self, Self::import)
    }

    /// Add a top level declaration.
    pub fn add(mut self, node: &impl Renderable) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::java();
        builder.push_line(&format!("/* {} */", GENERATED_MARKER));
        if !self.package.is_empty() {
            builder.push_line(&format!("package {};", self.package));
            builder.push_blank();
        }

        let imports = self.imports.render();
        for line in &imports {
            builder.push_line(line);
        }
        if !imports.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_has_no_declaration() {
        let source = JavaFile::new("").render();
        assert_eq!(source, format!("/* {} */\n", GENERATED_MARKER));
    }

    #[test]
    fn test_same_package_imports_are_dropped() {
        let source = JavaFile::new("org.acme")
            .imports(["org.acme.Foo", "java.lang.String", "org.apache.camel.CamelContext"])
            .render();
        assert!(!source.contains("import org.acme.Foo;"));
        assert!(!source.contains("java.lang.String"));
        assert!(source.contains("import org.apache.camel.CamelContext;\n"));
    }
}
