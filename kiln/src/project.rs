//! A loaded kiln.toml and everything derived from it.

use std::path::Path;

use kiln_codegen::{GenerationContext, GenerationPass, ProjectInfo, incremental::InputSet};
use kiln_index::{ScanRoot, Scanner, SymbolIndex};
use kiln_manifest::KilnToml;
use tracing::{info, warn};

use crate::goals;

pub struct Project {
    toml: KilnToml,
}

impl Project {
    pub fn open(path: &Path) -> kiln_manifest::Result<Self> {
        Ok(Self {
            toml: KilnToml::open(path)?,
        })
    }

    pub fn context(&self) -> GenerationContext {
        let config = &self.toml.manifest().project;
        let mut project = ProjectInfo::new(config.coordinates());
        if let Some(name) = &config.name {
            project = project.with_name(name);
        }
        if let Some(description) = &config.description {
            project = project.with_description(description);
        }
        GenerationContext::new(project, self.toml.output_layout())
    }

    /// Inputs watched by the staleness tracker.
    pub fn inputs(&self) -> InputSet {
        let mut inputs = InputSet::new().classes_dir(self.toml.classes_dir());
        for root in self.toml.source_roots() {
            inputs = inputs.source_root(root);
        }
        for (path, _) in self.toml.dependencies() {
            inputs = inputs.dependency(path);
        }
        inputs
    }

    /// Project classes first, then dependencies in declaration order.
    pub fn scanner(&self) -> Scanner {
        let dependencies = self
            .toml
            .dependencies()
            .into_iter()
            .map(|(path, coordinates)| match coordinates {
                Some(coordinates) => ScanRoot::with_artifact(path, coordinates),
                None => ScanRoot::new(path),
            });
        Scanner::new()
            .root(ScanRoot::new(self.toml.classes_dir()))
            .roots(dependencies)
    }

    pub fn scan(&self) -> SymbolIndex {
        let (index, stats) = self.scanner().scan();
        for skipped in &stats.skipped {
            warn!(error = %skipped, "skipped unreadable class");
        }
        info!(
            roots = stats.roots,
            classes = stats.classes,
            records = index.len(),
            "symbol index built"
        );
        index
    }

    /// A tracked pass over every enabled goal.
    pub fn pass(&self, force: bool) -> GenerationPass {
        goals::enabled(&self.toml.manifest().goals)
            .into_iter()
            .fold(GenerationPass::new(), GenerationPass::boxed_goal)
            .force(force)
            .tracker(self.inputs(), self.toml.cache_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[project]
group = "org.acme"
artifact = "camel-foo"
version = "1.0.0"
name = "Camel :: Foo"

[[build.dependencies]]
path = "lib/camel-api.jar"
coordinates = "org.apache.camel:camel-api:4.0.0"

[goals.urifactory]
enabled = false
"#;

    fn project() -> (tempfile::TempDir, Project) {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("kiln.toml");
        std::fs::write(&path, MANIFEST).unwrap();
        let project = Project::open(&path).unwrap();
        (temp, project)
    }

    #[test]
    fn test_context_carries_project_identity() {
        let (temp, project) = project();
        let ctx = project.context();
        assert_eq!(ctx.project.coordinates.to_string(), "org.acme:camel-foo:1.0.0");
        assert_eq!(ctx.project.name.as_deref(), Some("Camel :: Foo"));
        assert!(ctx.project.description.is_none());
        assert_eq!(ctx.layout.java, temp.path().join("src/generated/java"));
    }

    #[test]
    fn test_pass_skips_disabled_goals() {
        let (_temp, project) = project();
        let pass = project.pass(false);
        let kinds: Vec<_> = pass.goals().map(|g| g.kind()).collect();
        assert!(!kinds.contains(&"urifactory"));
        assert_eq!(kinds.len(), 5);
    }

    #[test]
    fn test_scan_of_missing_roots_is_empty() {
        let (_temp, project) = project();
        assert!(project.scan().is_empty());
    }

    #[test]
    fn test_status_before_first_run() {
        let (_temp, project) = project();
        let ctx = project.context();
        let status = project.pass(false).status(&ctx);
        assert_eq!(status.len(), 5);
        assert!(status.iter().all(|(_, s)| s.as_ref().is_some_and(|s| !s.is_up_to_date())));
    }
}
