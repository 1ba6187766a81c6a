//! Generate command report data structures.

use std::path::PathBuf;

use kiln_codegen::{Diagnostic, GoalStatus, PassReport, Severity, pipeline::Preview};
use kiln_core::OutputLayout;

use super::output::{Output, Report};

/// Outcome of a written generation pass.
#[derive(Debug)]
pub struct GenerateReport {
    /// `group:artifact:version` of the project.
    pub project: String,
    pub goals: Vec<GoalLine>,
    pub diagnostics: Vec<Diagnostic>,
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
}

/// One goal of the pass.
#[derive(Debug)]
pub struct GoalLine {
    pub kind: &'static str,
    pub status: GoalStatus,
    /// Why the goal ran, when tracked.
    pub reason: Option<String>,
    pub changed: usize,
    pub total: usize,
}

impl GenerateReport {
    pub fn new(project: String, report: &PassReport) -> Self {
        let summary = report.summary();
        Self {
            project,
            goals: report
                .goals
                .iter()
                .map(|g| GoalLine {
                    kind: g.kind,
                    status: g.status,
                    reason: g.staleness.as_ref().map(ToString::to_string),
                    changed: g.summary.changed(),
                    total: g.summary.total(),
                })
                .collect(),
            diagnostics: report.diagnostics.clone(),
            created: summary.created,
            updated: summary.updated,
        }
    }

    pub fn changed(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        out.title(&self.project);
        for goal in &self.goals {
            let mut line = goal.status.to_string();
            if goal.status == GoalStatus::Generated {
                line.push_str(&format!(" {}/{} changed", goal.changed, goal.total));
            }
            if let Some(reason) = &goal.reason {
                line.push_str(&format!(" ({})", reason));
            }
            out.row(goal.kind, &line);
        }

        if self.changed() > 0 {
            out.newline();
        }
        for path in &self.created {
            out.added_item(&path.display().to_string());
        }
        for path in &self.updated {
            out.changed_item(&path.display().to_string());
        }

        out.newline();
        let changed = self.changed();
        out.preformatted(&format!(
            "{} file{} changed",
            changed,
            if changed == 1 { "" } else { "s" }
        ));
    }
}

/// Artifacts a dry run would write.
#[derive(Debug)]
pub struct PreviewReport {
    pub files: Vec<(PathBuf, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PreviewReport {
    pub fn new(preview: Preview, layout: &OutputLayout) -> Self {
        Self {
            files: preview
                .artifacts
                .iter()
                .map(|(_, artifact)| (layout.resolve(artifact), artifact.content.clone()))
                .collect(),
            diagnostics: preview.diagnostics,
        }
    }
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        for (path, content) in &self.files {
            out.divider(&path.display().to_string());
            out.preformatted(content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", self.files.len()));
    }
}

fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let mut msg = format!("[{}] {}", diag.goal, diag.message);
        if let Some(location) = &diag.location {
            msg.push_str(&format!("\n  --> {}", location));
        }
        match diag.severity {
            Severity::Error => out.error(&msg),
            Severity::Warning => out.warning(&msg),
        }
    }
}
