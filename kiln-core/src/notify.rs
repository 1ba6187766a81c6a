//! Incremental-build notification hooks.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Receives a call for every file the writer created or updated, so a host
/// build tool or IDE can refresh its view of the output tree.
pub trait BuildNotifier {
    fn notify_changed(&self, path: &Path);
}

/// Discards notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl BuildNotifier for NoopNotifier {
    fn notify_changed(&self, _path: &Path) {}
}

/// Logs every notification at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl BuildNotifier for LogNotifier {
    fn notify_changed(&self, path: &Path) {
        tracing::info!(path = %path.display(), "refreshed");
    }
}

/// Collects notified paths in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    paths: Mutex<Vec<PathBuf>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths notified so far, in notification order.
    pub fn paths(&self) -> Vec<PathBuf> {
        match self.paths.lock() {
            Ok(paths) => paths.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BuildNotifier for RecordingNotifier {
    fn notify_changed(&self, path: &Path) {
        let mut paths = match self.paths.lock() {
            Ok(paths) => paths,
            Err(poisoned) => poisoned.into_inner(),
        };
        paths.push(path.to_path_buf());
    }
}
