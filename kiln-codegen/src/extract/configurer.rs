use std::collections::BTreeMap;

use kiln_core::natural_order;
use kiln_index::SymbolSource;
use tracing::debug;

use super::{ExtractionError, Extractor, class_records, markers};
use crate::{
    model::{ConfigurerOption, ConfigurerOptionSet},
    pipeline::GenerationContext,
};

const KIND: &str = "configurer";

/// Property configurer targets: marked classes plus an explicit list.
#[derive(Debug, Clone)]
pub struct ConfigurerExtractor {
    marker: String,
    classes: Vec<String>,
}

impl Default for ConfigurerExtractor {
    fn default() -> Self {
        Self {
            marker: markers::CONFIGURER.to_string(),
            classes: Vec::new(),
        }
    }
}

impl ConfigurerExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Classes to generate configurers for even when unmarked.
    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl Extractor for ConfigurerExtractor {
    type Model = Vec<ConfigurerOptionSet>;

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
    ) -> Result<Self::Model, ExtractionError> {
        let mut targets: BTreeMap<String, ConfigurerOptionSet> = BTreeMap::new();

        for record in class_records(source, &self.marker) {
            if record.get_bool("generateConfigurer") == Some(false) {
                debug!(class = %record.owner, "configurer generation disabled");
                continue;
            }
            let mut set = ConfigurerOptionSet::new(&record.owner);
            set.bootstrap = record.get_bool("bootstrap").unwrap_or(false);
            set.extended = record.get_bool("extended").unwrap_or(false);
            targets.insert(record.owner.clone(), set);
        }

        for class in &self.classes {
            if source.class(class).is_none() {
                return Err(ExtractionError::UnknownClass {
                    kind: KIND,
                    class: class.clone(),
                });
            }
            targets
                .entry(class.clone())
                .or_insert_with(|| ConfigurerOptionSet::new(class));
        }

        let mut sets: Vec<_> = targets
            .into_values()
            .map(|mut set| {
                let mut options: Vec<_> = source
                    .setters(&set.target)
                    .into_iter()
                    .map(|s| ConfigurerOption::new(s.property, s.java_type))
                    .collect();
                options.sort_by(|a, b| natural_order(&a.name, "", &b.name, ""));
                set.options = options;
                set
            })
            .collect();
        sets.sort_by(|a, b| {
            natural_order(
                crate::model::simple_name(&a.target),
                &a.target,
                crate::model::simple_name(&b.target),
                &b.target,
            )
        });
        Ok(sets)
    }
}
