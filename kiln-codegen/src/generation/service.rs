use std::path::PathBuf;

use kiln_core::{GENERATED_MARKER, GeneratedFile, OutputRoot, RenderError};

/// Root of the service registry in the resources tree.
pub const SERVICES_DIR: &str = "META-INF/services/org/apache/camel";

/// File name for an artifact name; `:` is not portable in file names.
pub fn file_name_of(name: &str) -> String {
    name.replace(':', "-")
}

/// Registry entry mapping a name to the class implementing it:
/// `META-INF/services/org/apache/camel/<kind>/<name>` with `class=<fqcn>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub kind: String,
    pub name: String,
    pub class_name: String,
}

impl ServiceEntry {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            class_name: class_name.into(),
        }
    }
}

impl GeneratedFile for ServiceEntry {
    fn root(&self) -> OutputRoot {
        OutputRoot::Resources
    }

    fn path(&self) -> PathBuf {
        PathBuf::from(SERVICES_DIR)
            .join(&self.kind)
            .join(file_name_of(&self.name))
    }

    fn check(&self) -> Result<(), RenderError> {
        if self.name.is_empty() || self.class_name.is_empty() {
            return Err(RenderError::new(
                self.path(),
                "service entry needs a name and a class",
            ));
        }
        Ok(())
    }

    fn render(&self) -> String {
        format!("# {}\nclass={}\n", GENERATED_MARKER, self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::RenderedArtifact;

    use super::*;

    #[test]
    fn test_service_entry() {
        let entry = ServiceEntry::new("dev-console", "route:dump", "org.acme.RouteDumpConsole");
        let artifact = RenderedArtifact::from_file(&entry).unwrap();
        assert_eq!(
            artifact.path,
            PathBuf::from("META-INF/services/org/apache/camel/dev-console/route-dump")
        );
        assert_eq!(
            artifact.content,
            format!("# {}\nclass=org.acme.RouteDumpConsole\n", GENERATED_MARKER)
        );
    }

    #[test]
    fn test_missing_class_rejected() {
        let entry = ServiceEntry::new("bean", "foo", "");
        assert!(entry.check().is_err());
    }
}
