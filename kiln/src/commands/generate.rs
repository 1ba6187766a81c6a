use clap::Args;
use eyre::{Context, Result};
use kiln_core::{LogNotifier, ResourceWriter};

use super::ConfigArg;
use crate::reports::{GenerateReport, PreviewReport, Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Run every goal even when its inputs are unchanged
    #[arg(long)]
    pub force: bool,

    /// Print the rendered files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.config.open();
        let ctx = project.context();
        let pass = project.pass(self.force);

        if self.dry_run {
            let index = project.scan();
            let preview = pass.preview(&index, &ctx);
            PreviewReport::new(preview, &ctx.layout).render(&mut TerminalOutput::new());
            return Ok(());
        }

        let notifier = LogNotifier;
        let writer = ResourceWriter::new(ctx.layout.clone(), &notifier);
        let report = pass
            .run_lazy(&ctx, &writer, || Ok(project.scan()))
            .wrap_err("Generation failed")?;

        GenerateReport::new(ctx.project.coordinates.to_string(), &report)
            .render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
