//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod clean;
mod generate;
mod output;
mod status;

pub use clean::CleanReport;
pub use generate::{GenerateReport, PreviewReport};
pub use output::{Report, TerminalOutput};
pub use status::StatusReport;
