//! Test fixtures for goals and renderers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::{Path, PathBuf};

use kiln_core::{Coordinates, OutputLayout, OutputRoot, RecordingNotifier, ResourceWriter};
use tempfile::TempDir;

use crate::pipeline::{GenerationContext, ProjectInfo};

/// Coordinates used by fixtures.
pub fn test_coordinates() -> Coordinates {
    Coordinates::new("org.acme", "camel-foo", "1.0.0")
}

/// A context with fixed coordinates and tool version, writing below `root`.
pub fn test_context(root: &Path) -> GenerationContext {
    GenerationContext::new(
        ProjectInfo::new(test_coordinates())
            .with_name("Camel :: Foo")
            .with_description("Foo support"),
        OutputLayout::conventional(root),
    )
    .with_tool_version("test")
}

/// A throwaway project directory with output trees and a cache dir.
pub struct TestProject {
    dir: TempDir,
    ctx: GenerationContext,
    notifier: RecordingNotifier,
}

impl TestProject {
    pub fn new() -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let ctx = test_context(dir.path());
        Ok(Self {
            dir,
            ctx,
            notifier: RecordingNotifier::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn ctx(&self) -> &GenerationContext {
        &self.ctx
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("target").join("kiln")
    }

    /// A writer reporting to this project's recording notifier.
    pub fn writer(&self) -> ResourceWriter<'_> {
        ResourceWriter::new(self.ctx.layout.clone(), &self.notifier)
    }

    pub fn notifier(&self) -> &RecordingNotifier {
        &self.notifier
    }

    /// Absolute path of an output file.
    pub fn output(&self, root: OutputRoot, relative: impl AsRef<Path>) -> PathBuf {
        self.ctx.layout.root(root).join(relative)
    }

    /// Content of an output file, if written.
    pub fn read(&self, root: OutputRoot, relative: impl AsRef<Path>) -> Option<String> {
        std::fs::read_to_string(self.output(root, relative)).ok()
    }
}
