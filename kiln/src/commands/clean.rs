use clap::Args;
use eyre::{Context, Result};

use super::ConfigArg;
use crate::reports::{CleanReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub config: ConfigArg,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.config.open();
        let ctx = project.context();
        let pass = project.pass(false);

        let mut removed = Vec::new();
        for goal in pass.goals() {
            let Some(tracker) = pass.tracker_for(goal, &ctx) else {
                continue;
            };
            let existed = tracker
                .clear()
                .wrap_err_with(|| format!("failed to clear the cache of goal '{}'", goal.kind()))?;
            if existed {
                removed.push(tracker.cache_file().to_path_buf());
            }
        }

        CleanReport { removed }.render(&mut TerminalOutput::new());
        Ok(())
    }
}
