use kiln_index::SymbolSource;

use super::{ExtractionError, Extractor, class_records, ensure_unique, markers};
use crate::{
    model::{TransformerModel, TransformerSet},
    pipeline::GenerationContext,
};

const KIND: &str = "transformer";

/// Data type transformers.
#[derive(Debug, Clone)]
pub struct TransformerExtractor {
    marker: String,
}

impl Default for TransformerExtractor {
    fn default() -> Self {
        Self {
            marker: markers::DATA_TYPE_TRANSFORMER.to_string(),
        }
    }
}

impl TransformerExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

impl Extractor for TransformerExtractor {
    type Model = TransformerSet;

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
    ) -> Result<TransformerSet, ExtractionError> {
        let mut transformers = Vec::new();
        for record in class_records(source, &self.marker) {
            // Unnamed transformers are registered under their source type.
            let name = record
                .get_str("name")
                .or_else(|| record.get_str("fromType"))
                .ok_or_else(|| ExtractionError::MissingAttribute {
                    kind: KIND,
                    owner: record.owner.clone(),
                    marker: record.marker.clone(),
                    attribute: "name",
                })?;
            let mut transformer = TransformerModel::new(name, &record.owner);
            transformer.from_type = record.get_str("fromType").map(str::to_string);
            transformer.to_type = record.get_str("toType").map(str::to_string);
            transformer.description = record.get_str("description").unwrap_or_default().to_string();
            transformer.deprecated = record.deprecated;
            transformers.push(transformer);
        }

        let set = TransformerSet::new(transformers);
        ensure_unique(KIND, &set)?;
        Ok(set)
    }
}
