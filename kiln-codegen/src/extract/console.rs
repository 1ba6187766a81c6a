use kiln_index::SymbolSource;

use super::{ExtractionError, Extractor, class_records, ensure_unique, markers, require};
use crate::{
    model::{ConsoleModel, ConsoleSet},
    pipeline::GenerationContext,
};

const KIND: &str = "console";

/// Developer consoles.
#[derive(Debug, Clone)]
pub struct ConsoleExtractor {
    marker: String,
}

impl Default for ConsoleExtractor {
    fn default() -> Self {
        Self {
            marker: markers::DEV_CONSOLE.to_string(),
        }
    }
}

impl ConsoleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

impl Extractor for ConsoleExtractor {
    type Model = ConsoleSet;

    fn kind(&self) -> &'static str {
        KIND
    }

    fn markers(&self) -> Vec<&str> {
        vec![self.marker.as_str()]
    }

    fn extract(
        &self,
        source: &dyn SymbolSource,
        _ctx: &GenerationContext,
    ) -> Result<ConsoleSet, ExtractionError> {
        let mut consoles = Vec::new();
        for record in class_records(source, &self.marker) {
            let mut console = ConsoleModel::new(require(KIND, record, "name")?, &record.owner);
            if let Some(group) = record.get_str("group") {
                console.group = group.to_string();
            }
            if let Some(title) = record.get_str("displayName") {
                console.title = title.to_string();
            }
            console.description = record.get_str("description").unwrap_or_default().to_string();
            console.deprecated = record.deprecated;
            consoles.push(console);
        }

        let set = ConsoleSet::new(consoles);
        ensure_unique(KIND, &set)?;
        Ok(set)
    }
}
