//! Watched inputs and their modification times.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Largest distance between local time and UTC.
const MAX_ZONE_OFFSET: Duration = Duration::from_secs(14 * 3600);

/// Files whose changes invalidate generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    pub source_roots: Vec<PathBuf>,
    pub classes_dir: Option<PathBuf>,
    /// Archives or class directories.
    pub dependencies: Vec<PathBuf>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_roots.push(path.into());
        self
    }

    pub fn classes_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.classes_dir = Some(path.into());
        self
    }

    pub fn dependency(mut self, path: impl Into<PathBuf>) -> Self {
        self.dependencies.push(path.into());
        self
    }

    /// Inputs modified strictly after `since`, at most `limit` of them.
    ///
    /// Archive entries are judged by the zone-less timestamp stored in the
    /// archive, read as late as any zone allows and capped at the archive
    /// file's own mtime. Missing inputs are ignored.
    pub fn newer_than(&self, since: SystemTime, limit: usize) -> Vec<PathBuf> {
        let mut stale = Vec::new();
        let roots = self
            .source_roots
            .iter()
            .chain(self.classes_dir.iter())
            .chain(self.dependencies.iter());
        for root in roots {
            if stale.len() >= limit {
                break;
            }
            if is_archive(root) && root.is_file() {
                archive_newer_than(root, since, limit, &mut stale);
            } else {
                tree_newer_than(root, since, limit, &mut stale);
            }
        }
        stale
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip"))
}

fn tree_newer_than(root: &Path, since: SystemTime, limit: usize, stale: &mut Vec<PathBuf>) {
    if !root.exists() {
        debug!(path = %root.display(), "input does not exist");
        return;
    }
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(Result::ok) {
        if stale.len() >= limit {
            return;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        if modified.is_some_and(|m| m > since) {
            stale.push(entry.into_path());
        }
    }
}

fn archive_newer_than(path: &Path, since: SystemTime, limit: usize, stale: &mut Vec<PathBuf>) {
    let archive = fs::File::open(path)
        .map_err(zip::result::ZipError::Io)
        .and_then(zip::ZipArchive::new);
    let mut archive = match archive {
        Ok(archive) => archive,
        Err(e) => {
            // Fall back to the archive's own timestamp.
            warn!(path = %path.display(), error = %e, "cannot read archive entries");
            tree_newer_than(path, since, limit, stale);
            return;
        }
    };
    // No entry is newer than the archive holding it.
    let written = fs::metadata(path).and_then(|m| m.modified()).ok();
    for i in 0..archive.len() {
        if stale.len() >= limit {
            return;
        }
        let Ok(entry) = archive.by_index(i) else {
            continue;
        };
        if entry.is_dir() {
            continue;
        }
        let modified = dos_time_to_system_time(entry.last_modified())
            .map(|m| m + MAX_ZONE_OFFSET)
            .map(|m| written.map_or(m, |w| m.min(w)));
        if modified.is_some_and(|m| m > since) {
            stale.push(PathBuf::from(format!("{}!/{}", path.display(), entry.name())));
        }
    }
}

/// Interpret an archive entry's DOS timestamp as UTC.
pub fn dos_time_to_system_time(time: zip::DateTime) -> Option<SystemTime> {
    let days = days_from_civil(
        i64::from(time.year()),
        i64::from(time.month()),
        i64::from(time.day()),
    );
    let seconds = days * 86_400
        + i64::from(time.hour()) * 3_600
        + i64::from(time.minute()) * 60
        + i64::from(time.second());
    let seconds = u64::try_from(seconds).ok()?;
    SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(seconds))
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;
    let month_index = (month + 9) % 12;
    let day_of_year = (153 * month_index + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}
