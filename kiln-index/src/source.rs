//! Query surface consumed by extractors.

use std::collections::HashSet;

use kiln_core::Coordinates;
use serde::Serialize;

use crate::record::SymbolRecord;

/// A public single-argument `set*` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setter {
    /// Property name derived from the method name (`setFooBar` -> `fooBar`).
    pub property: String,
    pub method: String,
    /// Parameter type.
    pub java_type: String,
}

/// Structural information about an indexed class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Coordinates>,
    /// Setters declared directly on this class.
    pub setters: Vec<Setter>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            interfaces: Vec::new(),
            deprecated: false,
            artifact: None,
            setters: Vec::new(),
        }
    }

    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn setter(mut self, property: &str, java_type: impl Into<String>) -> Self {
        self.setters.push(Setter {
            property: property.to_string(),
            method: format!("set{}", kiln_core::capitalize(property)),
            java_type: java_type.into(),
        });
        self
    }
}

/// Read-only view of indexed symbols.
///
/// Implemented by [`SymbolIndex`](crate::SymbolIndex); tests and other
/// hosts may provide their own.
pub trait SymbolSource {
    /// All records carrying `marker`, in deterministic order.
    fn lookup(&self, marker: &str) -> &[SymbolRecord];

    /// Structural information for a class, if indexed.
    fn class(&self, name: &str) -> Option<&ClassInfo>;

    /// All records whose owner is `owner`, in deterministic order.
    fn records_of(&self, owner: &str) -> Vec<&SymbolRecord>;

    /// Setters of `owner` and its indexed superclasses.
    ///
    /// A subclass setter shadows a superclass setter for the same property.
    fn setters(&self, owner: &str) -> Vec<Setter> {
        let mut seen = HashSet::new();
        let mut visited = HashSet::new();
        let mut result = Vec::new();
        let mut current = self.class(owner);
        while let Some(info) = current {
            if !visited.insert(info.name.as_str()) {
                break;
            }
            for setter in &info.setters {
                if seen.insert(setter.property.clone()) {
                    result.push(setter.clone());
                }
            }
            current = info.super_class.as_deref().and_then(|s| self.class(s));
        }
        result
    }

    /// Records on `owner` and its indexed superclasses for one marker.
    ///
    /// Subclass members shadow superclass members with the same name.
    fn inherited_records(&self, owner: &str, marker: &str) -> Vec<&SymbolRecord> {
        let mut names = HashSet::new();
        let mut visited = HashSet::new();
        let mut result = Vec::new();
        let mut current = Some(owner.to_string());
        while let Some(name) = current {
            if !visited.insert(name.clone()) {
                break;
            }
            for record in self.lookup(marker).iter().filter(|r| r.owner == name) {
                let key = (record.element.kind, record.element.name.clone());
                if names.insert(key) {
                    result.push(record);
                }
            }
            current = self.class(&name).and_then(|c| c.super_class.clone());
        }
        result
    }
}

impl<T: SymbolSource + ?Sized> SymbolSource for &T {
    fn lookup(&self, marker: &str) -> &[SymbolRecord] {
        (**self).lookup(marker)
    }

    fn class(&self, name: &str) -> Option<&ClassInfo> {
        (**self).class(name)
    }

    fn records_of(&self, owner: &str) -> Vec<&SymbolRecord> {
        (**self).records_of(owner)
    }

    fn setters(&self, owner: &str) -> Vec<Setter> {
        (**self).setters(owner)
    }

    fn inherited_records(&self, owner: &str, marker: &str) -> Vec<&SymbolRecord> {
        (**self).inherited_records(owner, marker)
    }
}
