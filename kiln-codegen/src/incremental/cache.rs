use std::{
    fs,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Fingerprint;

/// The cache record could not be used. Never fatal: callers treat it as
/// a cache miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access cache record '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cache record '{}' is corrupt", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted outcome of the last completed run of one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Tool version that wrote the record.
    pub version: String,
    pub goal: String,
    pub fingerprint: Fingerprint,
}

impl CacheRecord {
    /// Read a record and its modification time. `Ok(None)` when absent.
    pub fn load(path: &Path) -> Result<Option<(Self, SystemTime)>, CacheError> {
        let io_err = |source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        };
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(e)),
        };
        let modified = fs::metadata(path).and_then(|m| m.modified()).map_err(io_err)?;
        let record = serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some((record, modified)))
    }

    /// Write the record and stamp the file with the current time.
    pub fn store(&self, path: &Path) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut json = serde_json::to_string_pretty(self).map_err(|source| CacheError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        json.push('\n');
        fs::write(path, json).map_err(io_err)?;
        fs::File::options()
            .write(true)
            .open(path)
            .and_then(|f| f.set_modified(SystemTime::now()))
            .map_err(io_err)
    }
}
