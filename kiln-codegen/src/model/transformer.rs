use super::{Named, NamedSet};

/// A data type transformer, named explicitly or by its source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerModel {
    pub name: String,
    pub from_type: Option<String>,
    pub to_type: Option<String>,
    pub title: String,
    pub description: String,
    pub java_type: String,
    pub deprecated: bool,
}

impl TransformerModel {
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: kiln_core::to_title(&name),
            name,
            from_type: None,
            to_type: None,
            description: String::new(),
            java_type: java_type.into(),
            deprecated: false,
        }
    }
}

impl Named for TransformerModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn java_type(&self) -> &str {
        &self.java_type
    }
}

pub type TransformerSet = NamedSet<TransformerModel>;
