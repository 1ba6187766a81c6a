use super::{Named, NamedSet};

/// A developer console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleModel {
    pub name: String,
    pub group: String,
    pub title: String,
    pub description: String,
    pub java_type: String,
    pub deprecated: bool,
}

impl ConsoleModel {
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: kiln_core::to_title(&name),
            name,
            group: "camel".to_string(),
            description: String::new(),
            java_type: java_type.into(),
            deprecated: false,
        }
    }
}

impl Named for ConsoleModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn java_type(&self) -> &str {
        &self.java_type
    }
}

pub type ConsoleSet = NamedSet<ConsoleModel>;
