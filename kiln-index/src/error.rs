use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

use crate::classfile::ClassParseError;

/// A class-file or archive entry that could not be read.
///
/// These are recovered from: the scanner skips the entry and keeps going.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("IO error while scanning {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ZIP error while scanning {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("class parse error in {}: {source}", .path.display())]
    ClassFile {
        path: PathBuf,
        #[source]
        source: ClassParseError,
    },
}

impl IndexError {
    /// Path of the offending entry.
    pub fn path(&self) -> &PathBuf {
        match self {
            IndexError::Io { path, .. }
            | IndexError::Zip { path, .. }
            | IndexError::ClassFile { path, .. } => path,
        }
    }
}
