use std::{
    fmt,
    path::{Path, PathBuf},
};

use kiln_core::{Coordinates, TOOL_VERSION};
use tracing::{info, warn};

use super::{CacheError, CacheRecord, Fingerprint, InputSet};

/// Stale inputs reported per check.
const MAX_REPORTED: usize = 5;

/// Why a goal must run, or that it need not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    /// No usable cache record.
    NoPreviousRun,
    /// The goal's configuration differs from the recorded one.
    ConfigurationChanged,
    /// Inputs modified after the last completed run.
    StaleInputs(Vec<PathBuf>),
    UpToDate,
}

impl Staleness {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Staleness::UpToDate)
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Staleness::NoPreviousRun => write!(f, "no previous run data"),
            Staleness::ConfigurationChanged => write!(f, "configuration changed"),
            Staleness::StaleInputs(paths) => {
                write!(f, "stale input detected: ")?;
                let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "{}", paths.join(", "))
            }
            Staleness::UpToDate => write!(f, "up to date"),
        }
    }
}

/// Decides whether one goal of one project can be skipped.
#[derive(Debug, Clone)]
pub struct StalenessTracker {
    cache_file: PathBuf,
    goal: String,
    inputs: InputSet,
}

impl StalenessTracker {
    /// Track `goal` with its record at `<cache_dir>/<group>_<artifact>_<goal>.json`.
    pub fn new(cache_dir: &Path, project: &Coordinates, goal: &str, inputs: InputSet) -> Self {
        Self {
            cache_file: cache_dir.join(format!("{}_{}.json", project.key(), goal)),
            goal: goal.to_string(),
            inputs,
        }
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Compare the cache record against `fingerprint` and the inputs.
    ///
    /// An unreadable record is reported and treated as missing.
    pub fn check(&self, fingerprint: &Fingerprint) -> Staleness {
        let (record, recorded_at) = match CacheRecord::load(&self.cache_file) {
            Ok(Some(found)) => found,
            Ok(None) => {
                info!(goal = %self.goal, "no previous run data");
                return Staleness::NoPreviousRun;
            }
            Err(e) => {
                warn!(goal = %self.goal, error = %e, "ignoring unusable cache record");
                info!(goal = %self.goal, "no previous run data");
                return Staleness::NoPreviousRun;
            }
        };

        if record.goal != self.goal || &record.fingerprint != fingerprint {
            info!(goal = %self.goal, "configuration changed");
            return Staleness::ConfigurationChanged;
        }

        let stale = self.inputs.newer_than(recorded_at, MAX_REPORTED);
        if !stale.is_empty() {
            info!(goal = %self.goal, paths = ?stale, "stale input detected");
            return Staleness::StaleInputs(stale);
        }

        info!(goal = %self.goal, "up to date, skipping");
        Staleness::UpToDate
    }

    pub fn should_skip(&self, fingerprint: &Fingerprint) -> bool {
        self.check(fingerprint).is_up_to_date()
    }

    /// Persist `fingerprint` after a completed run.
    pub fn record(&self, fingerprint: &Fingerprint) -> Result<(), CacheError> {
        CacheRecord {
            version: TOOL_VERSION.to_string(),
            goal: self.goal.clone(),
            fingerprint: fingerprint.clone(),
        }
        .store(&self.cache_file)
    }

    /// Remove the cache record. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, CacheError> {
        match std::fs::remove_file(&self.cache_file) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io {
                path: self.cache_file.clone(),
                source,
            }),
        }
    }
}
