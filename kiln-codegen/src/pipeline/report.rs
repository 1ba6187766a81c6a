use std::fmt;

use kiln_core::WriteSummary;

use super::{Diagnostic, Severity};
use crate::incremental::Staleness;

/// What happened to one goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    /// Up to date; nothing extracted or written.
    Skipped,
    /// Artifacts rendered and written.
    Generated,
    /// No marked symbols; nothing to generate.
    Empty,
    /// Extraction or rendering failed.
    Failed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Skipped => write!(f, "skipped"),
            GoalStatus::Generated => write!(f, "generated"),
            GoalStatus::Empty => write!(f, "empty"),
            GoalStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalReport {
    pub kind: &'static str,
    pub status: GoalStatus,
    /// Staleness verdict; `None` when forced or untracked.
    pub staleness: Option<Staleness>,
    pub summary: WriteSummary,
}

impl GoalReport {
    pub(crate) fn new(kind: &'static str, status: GoalStatus, staleness: Option<Staleness>) -> Self {
        Self {
            kind,
            status,
            staleness,
            summary: WriteSummary::default(),
        }
    }
}

/// Outcome of a generation pass.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    pub goals: Vec<GoalReport>,
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the symbol index had to be built.
    pub index_loaded: bool,
}

impl PassReport {
    pub fn goal(&self, kind: &str) -> Option<&GoalReport> {
        self.goals.iter().find(|g| g.kind == kind)
    }

    /// Write outcomes of every goal.
    pub fn summary(&self) -> WriteSummary {
        let mut summary = WriteSummary::default();
        for goal in &self.goals {
            summary.merge(goal.summary.clone());
        }
        summary
    }

    /// Number of files created or updated.
    pub fn changed(&self) -> usize {
        self.goals.iter().map(|g| g.summary.changed()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}
