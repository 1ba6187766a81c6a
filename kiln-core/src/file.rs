use std::{
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::notify::BuildNotifier;

/// Marker embedded in every generated file.
///
/// Lines containing it are ignored when comparing fresh output against the
/// file on disk, so the marker may carry volatile details without forcing a
/// rewrite.
pub const GENERATED_MARKER: &str = "Generated by kiln build tools - do NOT edit this file!";

/// Which output tree a generated file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputRoot {
    /// Generated Java sources.
    Java,
    /// Generated JSON/properties resources.
    Resources,
}

impl fmt::Display for OutputRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputRoot::Java => write!(f, "java"),
            OutputRoot::Resources => write!(f, "resources"),
        }
    }
}

/// Absolute locations of the output trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub java: PathBuf,
    pub resources: PathBuf,
}

impl OutputLayout {
    pub fn new(java: impl Into<PathBuf>, resources: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            resources: resources.into(),
        }
    }

    /// Conventional layout below a project directory
    /// (`src/generated/java` and `src/generated/resources`).
    pub fn conventional(project_dir: &Path) -> Self {
        let generated = project_dir.join("src").join("generated");
        Self::new(generated.join("java"), generated.join("resources"))
    }

    pub fn root(&self, root: OutputRoot) -> &Path {
        match root {
            OutputRoot::Java => &self.java,
            OutputRoot::Resources => &self.resources,
        }
    }

    /// Resolve an artifact to its absolute path.
    pub fn resolve(&self, artifact: &RenderedArtifact) -> PathBuf {
        self.root(artifact.root).join(&artifact.path)
    }
}

/// A rendering precondition was violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot render '{}': {reason}", .path.display())]
pub struct RenderError {
    pub path: PathBuf,
    pub reason: String,
}

impl RenderError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A filesystem failure while writing output. Always fatal for the pass.
#[derive(Debug, Error)]
#[error("failed to write '{}'", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Output tree the file is written to.
    fn root(&self) -> OutputRoot;

    /// File path relative to its output root.
    fn path(&self) -> PathBuf;

    /// Check rendering preconditions.
    fn check(&self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Render the file content. Must be a pure function of `self`.
    fn render(&self) -> String;
}

/// Rendered output of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub root: OutputRoot,
    pub path: PathBuf,
    pub content: String,
}

impl RenderedArtifact {
    pub fn new(root: OutputRoot, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            root,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Check and render a generated file.
    pub fn from_file<F: GeneratedFile + ?Sized>(file: &F) -> Result<Self, RenderError> {
        file.check()?;
        Ok(Self::new(file.root(), file.path(), file.render()))
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// Existing content was identical; nothing was written.
    Unchanged,
    /// File did not exist and was written.
    Created,
    /// File existed with different content and was overwritten.
    Updated,
}

impl WriteOutcome {
    /// Whether the file on disk was touched.
    pub fn is_changed(&self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Unchanged => write!(f, "unchanged"),
            WriteOutcome::Created => write!(f, "created"),
            WriteOutcome::Updated => write!(f, "updated"),
        }
    }
}

/// Aggregate of write outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

impl WriteSummary {
    pub fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created.push(path),
            WriteOutcome::Updated => self.updated.push(path),
            WriteOutcome::Unchanged => self.unchanged.push(path),
        }
    }

    /// Number of files created or updated.
    pub fn changed(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    pub fn total(&self) -> usize {
        self.changed() + self.unchanged.len()
    }

    pub fn merge(&mut self, other: WriteSummary) {
        self.created.extend(other.created);
        self.updated.extend(other.updated);
        self.unchanged.extend(other.unchanged);
    }
}

/// Writes rendered artifacts only when their content actually changed.
pub struct ResourceWriter<'a> {
    layout: OutputLayout,
    notifier: &'a dyn BuildNotifier,
}

impl<'a> ResourceWriter<'a> {
    pub fn new(layout: OutputLayout, notifier: &'a dyn BuildNotifier) -> Self {
        Self { layout, notifier }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Write an artifact below its output root.
    pub fn write(&self, artifact: &RenderedArtifact) -> Result<WriteOutcome, WriteError> {
        self.write_path(&self.layout.resolve(artifact), &artifact.content)
    }

    /// Write `content` to `path` unless the existing file already holds it.
    pub fn write_path(&self, path: &Path, content: &str) -> Result<WriteOutcome, WriteError> {
        let outcome = match read_existing(path)? {
            None => WriteOutcome::Created,
            Some(existing) if same_content(&existing, content) => {
                tracing::debug!(path = %path.display(), "unchanged");
                return Ok(WriteOutcome::Unchanged);
            }
            Some(_) => WriteOutcome::Updated,
        };

        write_file(path, content)?;
        tracing::info!(path = %path.display(), %outcome, "wrote generated file");
        self.notifier.notify_changed(path);
        Ok(outcome)
    }
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, WriteError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(WriteError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Existing bytes that are not UTF-8 never match rendered text.
fn same_content(existing: &[u8], content: &str) -> bool {
    std::str::from_utf8(existing)
        .is_ok_and(|existing| normalize_for_compare(existing) == normalize_for_compare(content))
}

fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    let wrap = |source| WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, content).map_err(wrap)
}

/// Normalize content for comparison: CRLF becomes LF, marker lines are
/// dropped and trailing newlines are trimmed.
pub fn normalize_for_compare(content: &str) -> String {
    content
        .replace("\r\n", "\n")
        .lines()
        .filter(|line| !line.contains(GENERATED_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end_matches('\n')
        .to_string()
}
