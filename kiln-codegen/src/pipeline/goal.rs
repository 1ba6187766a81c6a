use std::path::PathBuf;

use kiln_core::{RenderError, RenderedArtifact};
use kiln_index::SymbolSource;
use thiserror::Error;

use super::GenerationContext;
use crate::extract::ExtractionError;

/// A goal could not produce its artifacts. Other goals are unaffected.
#[derive(Debug, Error)]
pub enum GoalError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to serialize '{}'", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GoalError {
    /// Class or output file the error is about.
    pub fn location(&self) -> String {
        match self {
            GoalError::Extraction(e) => e.owner().to_string(),
            GoalError::Render(e) => e.path.display().to_string(),
            GoalError::Serialize { path, .. } => path.display().to_string(),
        }
    }
}

/// One artifact kind: extract its model and render its files.
pub trait Goal {
    /// Kind name, also the staleness cache key.
    fn kind(&self) -> &'static str;

    /// Canonical text of the goal's options, hashed into its fingerprint.
    fn configuration(&self) -> String;

    /// Fail instead of warn when no marked symbol exists.
    fn require_symbols(&self) -> bool {
        false
    }

    /// Primary markers the goal generates from.
    fn markers(&self) -> Vec<String>;

    /// Whether there is anything to generate.
    fn has_symbols(&self, source: &dyn SymbolSource) -> bool {
        self.markers()
            .iter()
            .any(|marker| !source.lookup(marker).is_empty())
    }

    /// Every file of the goal, fully rendered. Must not touch the filesystem.
    fn artifacts(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
    ) -> Result<Vec<RenderedArtifact>, GoalError>;
}
