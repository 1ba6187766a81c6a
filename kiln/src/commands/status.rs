use clap::Args;
use eyre::Result;

use super::ConfigArg;
use crate::reports::{Report, StatusReport, TerminalOutput};

#[derive(Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub config: ConfigArg,
}

impl StatusCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.config.open();
        let ctx = project.context();
        let pass = project.pass(false);

        StatusReport {
            project: ctx.project.coordinates.to_string(),
            goals: pass.status(&ctx),
        }
        .render(&mut TerminalOutput::new());
        Ok(())
    }
}
