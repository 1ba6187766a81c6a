use std::path::{Path, PathBuf};

use kiln_core::{Coordinates, OutputLayout};

use super::Manifest;
use crate::Result;

/// A kiln.toml file on disk: raw content, parsed manifest, and the
/// directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct KilnToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl KilnToml {
    /// Open and parse a kiln.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory containing the manifest.
    pub fn project_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a manifest path against the project directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir().join(path)
        }
    }

    pub fn build_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.build.directory)
    }

    /// Directory holding the staleness cache records.
    pub fn cache_dir(&self) -> PathBuf {
        self.build_dir().join("kiln")
    }

    pub fn classes_dir(&self) -> PathBuf {
        match &self.manifest.build.classes {
            Some(classes) => self.resolve(classes),
            None => self.build_dir().join("classes"),
        }
    }

    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.manifest
            .build
            .sources
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }

    /// Dependency paths with their coordinates, in declaration order.
    pub fn dependencies(&self) -> Vec<(PathBuf, Option<Coordinates>)> {
        self.manifest
            .build
            .dependencies
            .iter()
            .map(|d| (self.resolve(&d.path), d.coordinates.clone()))
            .collect()
    }

    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout::new(
            self.resolve(&self.manifest.output.java),
            self.resolve(&self.manifest.output.resources),
        )
    }
}
