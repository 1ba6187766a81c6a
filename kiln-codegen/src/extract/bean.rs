use kiln_core::natural_order;
use kiln_index::{ElementKind, SymbolSource};

use super::{
    ExtractionError, Extractor, class_records, ensure_unique, markers,
    options::option_from_record, require,
};
use crate::{
    model::{BeanModel, BeanSet, OptionKind},
    pipeline::GenerationContext,
};

const KIND: &str = "bean";

/// Named beans and their `Metadata` documented properties.
#[derive(Debug, Clone)]
pub struct BeanExtractor {
    marker: String,
}

impl Default for BeanExtractor {
    fn default() -> Self {
        Self {
            marker: markers::BEAN.to_string(),
        }
    }
}

impl BeanExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

impl Extractor for BeanExtractor {
    type Model = BeanSet;

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
    ) -> Result<BeanSet, ExtractionError> {
        let mut beans = Vec::new();
        for record in class_records(source, &self.marker) {
            let mut bean = BeanModel::new(require(KIND, record, "name")?, &record.owner);
            if let Some(title) = record.get_str("title") {
                bean.title = title.to_string();
            }
            bean.description = record.get_str("description").unwrap_or_default().to_string();
            bean.interface_type = record.get_str("interfaceType").map(str::to_string);
            bean.deprecated = record.deprecated;

            let mut properties: Vec<_> = source
                .inherited_records(&record.owner, markers::METADATA)
                .into_iter()
                .filter(|r| r.element.kind != ElementKind::Class)
                .map(|r| option_from_record(source, r, OptionKind::Property, ""))
                .collect();
            properties.sort_by(|a, b| natural_order(&a.name, "", &b.name, ""));
            properties.dedup_by(|a, b| a.name == b.name);
            bean.properties = properties;

            beans.push(bean);
        }

        let set = BeanSet::new(beans);
        ensure_unique(KIND, &set)?;
        Ok(set)
    }
}
