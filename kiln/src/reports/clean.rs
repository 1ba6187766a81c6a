//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Cache records removed by `kiln clean`.
#[derive(Debug)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.removed.is_empty() {
            out.preformatted("No cache records found.");
            return;
        }
        out.title("Removed cache records:");
        for path in &self.removed {
            out.removed_item(&path.display().to_string());
        }
    }
}
