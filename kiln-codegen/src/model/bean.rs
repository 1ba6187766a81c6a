use super::{Named, NamedSet, OptionModel};

/// A named bean with its documented properties.
#[derive(Debug, Clone, PartialEq)]
pub struct BeanModel {
    pub name: String,
    pub title: String,
    pub description: String,
    pub java_type: String,
    pub interface_type: Option<String>,
    pub deprecated: bool,
    /// Properties in natural order.
    pub properties: Vec<OptionModel>,
}

impl BeanModel {
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: kiln_core::to_title(&name),
            name,
            description: String::new(),
            java_type: java_type.into(),
            interface_type: None,
            deprecated: false,
            properties: Vec::new(),
        }
    }
}

impl Named for BeanModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn java_type(&self) -> &str {
        &self.java_type
    }
}

pub type BeanSet = NamedSet<BeanModel>;
