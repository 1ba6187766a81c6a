use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use kiln_core::Coordinates;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::classfile::parse_class;
use crate::error::IndexError;
use crate::index::{IndexBuilder, SymbolIndex};

/// A classes directory, archive or single class file to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    pub path: PathBuf,
    /// Artifact the classes belong to; `None` for the project's own classes.
    pub artifact: Option<Coordinates>,
}

impl ScanRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            artifact: None,
        }
    }

    pub fn with_artifact(path: impl Into<PathBuf>, artifact: Coordinates) -> Self {
        Self {
            path: path.into(),
            artifact: Some(artifact),
        }
    }
}

/// What a scan looked at and what it had to skip.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Roots that existed and were scanned.
    pub roots: usize,
    /// Classes added to the index.
    pub classes: usize,
    /// Classes already defined by an earlier root.
    pub duplicates: usize,
    pub skipped: Vec<IndexError>,
}

/// Builds a [`SymbolIndex`] from compiled classes.
///
/// Roots are scanned in order; when two roots define the same class the
/// first one wins. Unreadable entries are logged and skipped.
#[derive(Debug, Default, Clone)]
pub struct Scanner {
    roots: Vec<ScanRoot>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: ScanRoot) -> Self {
        self.roots.push(root);
        self
    }

    pub fn roots(mut self, roots: impl IntoIterator<Item = ScanRoot>) -> Self {
        self.roots.extend(roots);
        self
    }

    pub fn scan(&self) -> (SymbolIndex, ScanStats) {
        let mut builder = SymbolIndex::builder();
        let mut stats = ScanStats::default();

        for root in &self.roots {
            let path = &root.path;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "scan root does not exist, skipping");
                continue;
            }
            stats.roots += 1;
            tracing::debug!(path = %path.display(), "scanning");

            if path.is_dir() {
                scan_dir(path, root.artifact.as_ref(), &mut builder, &mut stats);
            } else if is_archive(path) {
                let artifact = root.artifact.as_ref();
                if let Err(err) = scan_archive(path, artifact, &mut builder, &mut stats) {
                    skip(&mut stats, err);
                }
            } else if is_class_file(path) {
                match fs::read(path) {
                    Ok(bytes) => {
                        let artifact = root.artifact.as_ref();
                        add_class(path, &bytes, artifact, &mut builder, &mut stats)
                    }
                    Err(source) => skip(
                        &mut stats,
                        IndexError::Io {
                            path: path.clone(),
                            source,
                        },
                    ),
                }
            } else {
                tracing::debug!(path = %path.display(), "not a class container, skipping");
            }
        }

        let index = builder.build();
        tracing::debug!(
            roots = stats.roots,
            classes = stats.classes,
            records = index.len(),
            skipped = stats.skipped.len(),
            "symbol index built"
        );
        (index, stats)
    }
}

fn scan_dir(
    root: &Path,
    artifact: Option<&Coordinates>,
    builder: &mut IndexBuilder,
    stats: &mut ScanStats,
) {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.path().ends_with("META-INF/versions"));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                skip(stats, IndexError::Io { path, source });
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_class_file(path) {
            continue;
        }
        match fs::read(path) {
            Ok(bytes) => add_class(path, &bytes, artifact, builder, stats),
            Err(source) => skip(
                stats,
                IndexError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            ),
        }
    }
}

fn scan_archive(
    path: &Path,
    artifact: Option<&Coordinates>,
    builder: &mut IndexBuilder,
    stats: &mut ScanStats,
) -> Result<(), IndexError> {
    let file = File::open(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| IndexError::Zip {
        path: path.to_path_buf(),
        source,
    })?;

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(source) => {
                skip(
                    stats,
                    IndexError::Zip {
                        path: path.to_path_buf(),
                        source,
                    },
                );
                continue;
            }
        };
        let name = entry.name().to_string();
        if entry.is_dir()
            || name.starts_with("META-INF/versions/")
            || !is_class_file(Path::new(&name))
        {
            continue;
        }

        let entry_path = path.join(&name);
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        if let Err(source) = entry.read_to_end(&mut bytes) {
            skip(
                stats,
                IndexError::Io {
                    path: entry_path,
                    source,
                },
            );
            continue;
        }
        add_class(&entry_path, &bytes, artifact, builder, stats);
    }
    Ok(())
}

fn add_class(
    path: &Path,
    bytes: &[u8],
    artifact: Option<&Coordinates>,
    builder: &mut IndexBuilder,
    stats: &mut ScanStats,
) {
    match parse_class(bytes) {
        Ok(class) => {
            let name = class.name.clone();
            if builder.push_parsed(class, artifact) {
                stats.classes += 1;
            } else {
                tracing::debug!(class = %name, path = %path.display(), "duplicate class ignored");
                stats.duplicates += 1;
            }
        }
        Err(source) => skip(
            stats,
            IndexError::ClassFile {
                path: path.to_path_buf(),
                source,
            },
        ),
    }
}

fn skip(stats: &mut ScanStats, err: IndexError) {
    tracing::warn!("skipping unreadable entry: {}", err);
    stats.skipped.push(err);
}

fn is_class_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "class")
        && path.file_name().is_some_and(|n| n != "module-info.class")
}

pub(crate) fn is_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_class_file() {
        assert!(is_class_file(Path::new("com/acme/Foo.class")));
        assert!(!is_class_file(Path::new("module-info.class")));
        assert!(!is_class_file(Path::new("com/acme/Foo.java")));
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive(Path::new("lib/foo-1.0.jar")));
        assert!(is_archive(Path::new("lib/FOO.ZIP")));
        assert!(!is_archive(Path::new("lib/foo.class")));
    }

    #[test]
    fn test_missing_roots_are_ignored() {
        let (index, stats) = Scanner::new()
            .root(ScanRoot::new("/definitely/not/here"))
            .scan();
        assert!(index.is_empty());
        assert_eq!(stats.roots, 0);
        assert!(stats.skipped.is_empty());
    }
}
