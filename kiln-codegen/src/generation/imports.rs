//! Java import collection.

use std::collections::BTreeSet;

/// Tracks Java imports and renders them in a stable order.
///
/// `java.*` and `javax.*` imports come first, followed by a blank line and
/// every other import, each group sorted.
///
/// # Example
///
/// ```
/// use kiln_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("org.apache.camel.CamelContext");
/// imports.add("java.util.Map");
/// assert_eq!(
///     imports.render(),
///     vec!["import java.util.Map;", "", "import org.apache.camel.CamelContext;"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: BTreeSet<String>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully qualified type name.
    pub fn add(&mut self, fqcn: impl Into<String>) {
        self.imports.insert(fqcn.into());
    }

    /// Add a type unless it lives in `package` or `java.lang`.
    pub fn add_for(&mut self, package: &str, fqcn: &str) {
        let owner = fqcn.rsplit_once('.').map(|(p, _)| p).unwrap_or("");
        if owner != package && owner != "java.lang" && !owner.is_empty() {
            self.add(fqcn);
        }
    }

    pub fn merge(&mut self, other: &ImportCollector) {
        self.imports.extend(other.imports.iter().cloned());
    }

    pub fn contains(&self, fqcn: &str) -> bool {
        self.imports.contains(fqcn)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Import lines, grouped, with an empty string between groups.
    pub fn render(&self) -> Vec<String> {
        let (platform, other): (Vec<_>, Vec<_>) = self
            .imports
            .iter()
            .partition(|i| i.starts_with("java.") || i.starts_with("javax."));

        let mut lines: Vec<String> = platform
            .iter()
            .map(|i| format!("import {};", i))
            .collect();
        if !lines.is_empty() && !other.is_empty() {
            lines.push(String::new());
        }
        lines.extend(other.iter().map(|i| format!("import {};", i)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_and_groups() {
        let mut imports = ImportCollector::new();
        imports.add("org.b.B");
        imports.add("java.util.Set");
        imports.add("org.a.A");
        imports.add("java.util.Map");
        imports.add("org.a.A");
        assert_eq!(imports.len(), 4);
        assert_eq!(
            imports.render(),
            vec![
                "import java.util.Map;",
                "import java.util.Set;",
                "",
                "import org.a.A;",
                "import org.b.B;",
            ]
        );
    }

    #[test]
    fn test_add_for_skips_same_package() {
        let mut imports = ImportCollector::new();
        imports.add_for("org.acme", "org.acme.Foo");
        imports.add_for("org.acme", "java.lang.String");
        imports.add_for("org.acme", "org.other.Bar");
        assert!(!imports.contains("org.acme.Foo"));
        assert!(!imports.contains("java.lang.String"));
        assert!(imports.contains("org.other.Bar"));
    }

    #[test]
    fn test_merge() {
        let mut a = ImportCollector::new();
        a.add("java.util.Map");
        let mut b = ImportCollector::new();
        b.add("java.util.Set");
        a.merge(&b);
        assert_eq!(a.len(), 2);
    }
}
