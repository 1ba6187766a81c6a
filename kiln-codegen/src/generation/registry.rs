//! Collects the rendered artifacts of one goal before anything is written.

use std::collections::HashSet;

use kiln_core::{
    GeneratedFile, OutputRoot, RenderError, RenderedArtifact, ResourceWriter, WriteError,
    WriteSummary,
};

/// Rendered artifacts of one goal.
///
/// Every file is checked and rendered on registration, so a goal either
/// produces its complete set of artifacts or a [`RenderError`] before the
/// first byte reaches disk.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: Vec<RenderedArtifact>,
    paths: HashSet<(OutputRoot, std::path::PathBuf)>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check, render and register a file.
    pub fn register<F: GeneratedFile + ?Sized>(&mut self, file: &F) -> Result<(), RenderError> {
        self.push(RenderedArtifact::from_file(file)?)
    }

    /// Register an already rendered artifact.
    ///
    /// Two artifacts of one goal may not target the same file.
    pub fn push(&mut self, artifact: RenderedArtifact) -> Result<(), RenderError> {
        if !self.paths.insert((artifact.root, artifact.path.clone())) {
            return Err(RenderError::new(
                &artifact.path,
                "file is produced twice by the same goal",
            ));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn artifacts(&self) -> &[RenderedArtifact] {
        &self.artifacts
    }

    pub fn into_artifacts(self) -> Vec<RenderedArtifact> {
        self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Write every artifact, in registration order.
    pub fn write_all(&self, writer: &ResourceWriter<'_>) -> Result<WriteSummary, WriteError> {
        write_artifacts(&self.artifacts, writer)
    }
}

/// Write artifacts in order, stopping at the first filesystem failure.
pub(crate) fn write_artifacts(
    artifacts: &[RenderedArtifact],
    writer: &ResourceWriter<'_>,
) -> Result<WriteSummary, WriteError> {
    let mut summary = WriteSummary::default();
    for artifact in artifacts {
        let outcome = writer.write(artifact)?;
        summary.record(writer.layout().resolve(artifact), outcome);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use kiln_core::{NoopNotifier, OutputLayout};

    use super::*;
    use crate::generation::ServiceEntry;

    #[test]
    fn test_duplicate_path_rejected() {
        let mut registry = ArtifactRegistry::new();
        registry
            .register(&ServiceEntry::new("bean", "foo", "a.Foo"))
            .unwrap();
        let err = registry
            .register(&ServiceEntry::new("bean", "foo", "b.Foo"))
            .unwrap_err();
        assert!(err.reason.contains("twice"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_write_all_twice() {
        let temp = tempfile::TempDir::new().unwrap();
        let notifier = NoopNotifier;
        let writer = ResourceWriter::new(OutputLayout::conventional(temp.path()), &notifier);

        let mut registry = ArtifactRegistry::new();
        registry
            .register(&ServiceEntry::new("bean", "foo", "a.Foo"))
            .unwrap();

        let first = registry.write_all(&writer).unwrap();
        assert_eq!(first.created.len(), 1);
        let second = registry.write_all(&writer).unwrap();
        assert_eq!(second.changed(), 0);
        assert_eq!(second.unchanged.len(), 1);
    }
}
