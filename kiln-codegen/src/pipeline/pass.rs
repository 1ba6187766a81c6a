//! Pass orchestrator.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use kiln_core::{RenderedArtifact, ResourceWriter};
use kiln_index::SymbolSource;
use tracing::{error, info, warn};

use super::{Diagnostic, GenerationContext, Goal, GoalReport, GoalStatus, PassReport};
use crate::{
    generation::write_artifacts,
    incremental::{Fingerprint, InputSet, Staleness, StalenessTracker},
};

/// Runs a set of goals against one project.
///
/// Goals are independent: a failing goal is reported and the others still
/// run. Only a filesystem failure while writing aborts the pass.
///
/// # Example
///
/// ```ignore
/// let report = GenerationPass::new()
///     .goal(BeanGoal::default())
///     .tracker(inputs, cache_dir)
///     .run(&index, &ctx, &writer)?;
/// ```
#[derive(Default)]
pub struct GenerationPass {
    goals: Vec<Box<dyn Goal>>,
    force: bool,
    tracking: Option<Tracking>,
}

struct Tracking {
    inputs: InputSet,
    cache_dir: PathBuf,
}

/// Artifacts a pass would write, without writing them.
#[derive(Debug, Default)]
pub struct Preview {
    pub artifacts: Vec<(&'static str, RenderedArtifact)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A goal that passed the staleness gate.
struct Pending<'a> {
    goal: &'a dyn Goal,
    fingerprint: Fingerprint,
    tracker: Option<StalenessTracker>,
    staleness: Option<Staleness>,
}

impl GenerationPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal(mut self, goal: impl Goal + 'static) -> Self {
        self.goals.push(Box::new(goal));
        self
    }

    pub fn boxed_goal(mut self, goal: Box<dyn Goal>) -> Self {
        self.goals.push(goal);
        self
    }

    /// Run every goal regardless of staleness.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Gate goals on the cache records in `cache_dir`.
    pub fn tracker(mut self, inputs: InputSet, cache_dir: impl Into<PathBuf>) -> Self {
        self.tracking = Some(Tracking {
            inputs,
            cache_dir: cache_dir.into(),
        });
        self
    }

    pub fn goals(&self) -> impl Iterator<Item = &dyn Goal> {
        self.goals.iter().map(|g| g.as_ref())
    }

    /// Staleness tracker of a goal, when tracking is configured.
    pub fn tracker_for(&self, goal: &dyn Goal, ctx: &GenerationContext) -> Option<StalenessTracker> {
        self.tracking.as_ref().map(|t| {
            StalenessTracker::new(
                &t.cache_dir,
                &ctx.project.coordinates,
                goal.kind(),
                t.inputs.clone(),
            )
        })
    }

    /// Staleness verdict of every goal, without running anything.
    pub fn status(&self, ctx: &GenerationContext) -> Vec<(&'static str, Option<Staleness>)> {
        self.goals()
            .map(|goal| {
                let fingerprint = Fingerprint::compute(goal.kind(), &goal.configuration(), ctx);
                let staleness = self.tracker_for(goal, ctx).map(|t| t.check(&fingerprint));
                (goal.kind(), staleness)
            })
            .collect()
    }

    /// Run the pass against an already built symbol source.
    pub fn run(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
        writer: &ResourceWriter<'_>,
    ) -> Result<PassReport> {
        self.run_lazy(ctx, writer, || Ok(source))
    }

    /// Run the pass, building the symbol source only if a goal needs it.
    pub fn run_lazy<S, L>(
        &self,
        ctx: &GenerationContext,
        writer: &ResourceWriter<'_>,
        load: L,
    ) -> Result<PassReport>
    where
        S: SymbolSource,
        L: FnOnce() -> Result<S>,
    {
        let mut report = PassReport::default();
        let pending = self.gate(ctx, &mut report);
        if pending.is_empty() {
            info!("all goals up to date");
            return Ok(report);
        }

        let source = load().wrap_err("failed to build the symbol index")?;
        report.index_loaded = true;

        for item in pending {
            let kind = item.goal.kind();
            let mut goal_report = GoalReport::new(kind, GoalStatus::Generated, item.staleness);

            match self.produce(item.goal, &source, ctx, &mut report) {
                Some(artifacts) if artifacts.is_empty() => goal_report.status = GoalStatus::Empty,
                Some(artifacts) => {
                    goal_report.summary = write_artifacts(&artifacts, writer)
                        .wrap_err_with(|| format!("goal '{}' failed to write its output", kind))?;
                }
                None => {
                    goal_report.status = GoalStatus::Failed;
                    report.goals.push(goal_report);
                    continue;
                }
            }

            if let Some(tracker) = &item.tracker {
                if let Err(e) = tracker.record(&item.fingerprint) {
                    warn!(goal = kind, error = %e, "failed to record cache entry");
                }
            }
            info!(
                goal = kind,
                changed = goal_report.summary.changed(),
                total = goal_report.summary.total(),
                "goal completed"
            );
            report.goals.push(goal_report);
        }

        info!(
            changed = report.changed(),
            errors = report.error_count(),
            "generation pass finished"
        );
        Ok(report)
    }

    /// Render every goal without writing or consulting the cache.
    pub fn preview(&self, source: &dyn SymbolSource, ctx: &GenerationContext) -> Preview {
        let mut report = PassReport::default();
        let mut preview = Preview::default();
        for goal in self.goals() {
            if let Some(artifacts) = self.produce(goal, source, ctx, &mut report) {
                preview
                    .artifacts
                    .extend(artifacts.into_iter().map(|a| (goal.kind(), a)));
            }
        }
        preview.diagnostics = report.diagnostics;
        preview
    }

    /// Split goals into skipped ones (reported) and ones that must run.
    fn gate<'a>(&'a self, ctx: &GenerationContext, report: &mut PassReport) -> Vec<Pending<'a>> {
        let mut pending = Vec::new();
        for goal in self.goals() {
            let fingerprint = Fingerprint::compute(goal.kind(), &goal.configuration(), ctx);
            let tracker = self.tracker_for(goal, ctx);
            let staleness = match (&tracker, self.force) {
                (Some(tracker), false) => Some(tracker.check(&fingerprint)),
                _ => None,
            };
            if staleness.as_ref().is_some_and(Staleness::is_up_to_date) {
                report
                    .goals
                    .push(GoalReport::new(goal.kind(), GoalStatus::Skipped, staleness));
                continue;
            }
            pending.push(Pending {
                goal,
                fingerprint,
                tracker,
                staleness,
            });
        }
        pending
    }

    /// Artifacts of one goal; `None` when it failed. An empty list means
    /// there was nothing to generate.
    fn produce(
        &self,
        goal: &dyn Goal,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
        report: &mut PassReport,
    ) -> Option<Vec<RenderedArtifact>> {
        let kind = goal.kind();
        if !goal.has_symbols(source) {
            let message = format!("no symbols marked with {}", goal.markers().join(", "));
            if goal.require_symbols() {
                error!(goal = kind, "{}", message);
                report.diagnostics.push(Diagnostic::error(kind, message));
                return None;
            }
            warn!(goal = kind, "{}", message);
            report.diagnostics.push(Diagnostic::warning(kind, message));
            return Some(Vec::new());
        }

        match goal.artifacts(source, ctx) {
            Ok(artifacts) => Some(artifacts),
            Err(e) => {
                error!(goal = kind, error = %e, "goal failed");
                report
                    .diagnostics
                    .push(Diagnostic::error(kind, e.to_string()).at(e.location()));
                None
            }
        }
    }
}
