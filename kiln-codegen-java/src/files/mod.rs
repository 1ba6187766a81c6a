//! File type definitions for Java code generation.
//!
//! Each struct implements [`kiln_core::GeneratedFile`] and renders one
//! source file below the Java output root.

mod configurer;
mod uri_factory;

use std::path::PathBuf;

pub use configurer::PropertyConfigurer;
pub use uri_factory::EndpointUriFactory;

/// Source path of a class: `org/acme/Foo.java`.
pub(crate) fn source_path(package: &str, class_name: &str) -> PathBuf {
    let mut path: PathBuf = package.split('.').filter(|p| !p.is_empty()).collect();
    path.push(format!("{}.java", class_name));
    path
}

/// Java string literal.
pub(crate) fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path() {
        assert_eq!(source_path("org.acme", "Foo"), PathBuf::from("org/acme/Foo.java"));
        assert_eq!(source_path("", "Foo"), PathBuf::from("Foo.java"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }
}
