//! Model extractors: turn indexed symbols into typed models.
//!
//! Each extractor queries a [`SymbolSource`] for one primary marker and
//! builds the model of one artifact kind. Missing optional attributes
//! fall back to defaults; a missing required attribute is an
//! [`ExtractionError`] naming the kind, class, marker and attribute.

mod bean;
mod component;
mod configurer;
mod console;
mod options;
mod transformer;

use std::collections::HashMap;

pub use bean::BeanExtractor;
pub use component::{ComponentExtractor, label_as_group_name};
pub use configurer::ConfigurerExtractor;
pub use console::ConsoleExtractor;
use kiln_index::{ElementKind, SymbolRecord, SymbolSource};
use thiserror::Error;
pub use transformer::TransformerExtractor;

use crate::{
    model::{Named, NamedSet},
    pipeline::GenerationContext,
};

/// Default marker names.
pub mod markers {
    pub const URI_ENDPOINT: &str = "org.apache.camel.spi.UriEndpoint";
    pub const URI_PATH: &str = "org.apache.camel.spi.UriPath";
    pub const URI_PARAM: &str = "org.apache.camel.spi.UriParam";
    pub const URI_PARAMS: &str = "org.apache.camel.spi.UriParams";
    pub const METADATA: &str = "org.apache.camel.spi.Metadata";
    pub const COMPONENT: &str = "org.apache.camel.spi.annotations.Component";
    pub const BEAN: &str = "org.apache.camel.spi.annotations.Bean";
    pub const DEV_CONSOLE: &str = "org.apache.camel.spi.annotations.DevConsole";
    pub const DATA_TYPE_TRANSFORMER: &str = "org.apache.camel.spi.DataTypeTransformer";
    pub const CONFIGURER: &str = "org.apache.camel.spi.Configurer";
}

/// Symbols could not be turned into a model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("{kind} '{owner}': {marker} is missing required attribute '{attribute}'")]
    MissingAttribute {
        kind: &'static str,
        owner: String,
        marker: String,
        attribute: &'static str,
    },

    #[error("{kind}: class '{class}' is not in the symbol index")]
    UnknownClass { kind: &'static str, class: String },

    #[error("{kind} name '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateName {
        kind: &'static str,
        name: String,
        first: String,
        second: String,
    },
}

impl ExtractionError {
    /// Artifact kind that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::MissingAttribute { kind, .. }
            | ExtractionError::UnknownClass { kind, .. }
            | ExtractionError::DuplicateName { kind, .. } => kind,
        }
    }

    /// Class the error is about; the later declaration for duplicates.
    pub fn owner(&self) -> &str {
        match self {
            ExtractionError::MissingAttribute { owner, .. } => owner,
            ExtractionError::UnknownClass { class, .. } => class,
            ExtractionError::DuplicateName { second, .. } => second,
        }
    }
}

/// Builds the model of one artifact kind.
pub trait Extractor {
    type Model;

    /// Artifact kind, e.g. `bean`.
    fn kind(&self) -> &'static str;

    /// Primary markers; a kind with no record for any of them has nothing
    /// to generate.
    fn markers(&self) -> Vec<&str>;

    /// Pure function of the symbols and the context.
    fn extract(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
    ) -> Result<Self::Model, ExtractionError>;
}

/// Class level records for a marker.
pub(crate) fn class_records<'a>(
    source: &'a dyn SymbolSource,
    marker: &'a str,
) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
    source
        .lookup(marker)
        .iter()
        .filter(|r| r.element.kind == ElementKind::Class)
}

/// A non-empty string attribute that must be present.
pub(crate) fn require<'r>(
    kind: &'static str,
    record: &'r SymbolRecord,
    attribute: &'static str,
) -> Result<&'r str, ExtractionError> {
    record
        .get_str(attribute)
        .ok_or_else(|| ExtractionError::MissingAttribute {
            kind,
            owner: record.owner.clone(),
            marker: record.marker.clone(),
            attribute,
        })
}

/// Reject two models of one kind sharing a name.
pub(crate) fn ensure_unique<T: Named>(
    kind: &'static str,
    set: &NamedSet<T>,
) -> Result<(), ExtractionError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for item in set {
        if let Some(first) = seen.insert(item.name(), item.java_type()) {
            return Err(ExtractionError::DuplicateName {
                kind,
                name: item.name().to_string(),
                first: first.to_string(),
                second: item.java_type().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConsoleModel;

    #[test]
    fn test_require_reports_context() {
        let record = SymbolRecord::on_class("org.acme.FooBean", markers::BEAN);
        let err = require("bean", &record, "name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "bean 'org.acme.FooBean': org.apache.camel.spi.annotations.Bean is missing required attribute 'name'"
        );
        assert_eq!(err.kind(), "bean");
    }

    #[test]
    fn test_empty_attribute_counts_as_missing() {
        let record = SymbolRecord::on_class("org.acme.FooBean", markers::BEAN).attr("name", "");
        assert!(require("bean", &record, "name").is_err());
    }

    #[test]
    fn test_ensure_unique() {
        let set = NamedSet::new(vec![
            ConsoleModel::new("route", "a.RouteConsole"),
            ConsoleModel::new("route", "b.RouteConsole"),
        ]);
        let err = ensure_unique("console", &set).unwrap_err();
        assert!(matches!(err, ExtractionError::DuplicateName { .. }));
    }
}
