//! Typed models built by the extractors and consumed by the renderers.
//!
//! Models are plain data. Every collection is already in natural order
//! when an extractor returns it.

mod bean;
mod component;
mod configurer;
mod console;
mod java;
mod option;
mod transformer;

pub use bean::{BeanModel, BeanSet};
pub use component::{ComponentModel, syntax_placeholders};
pub use configurer::{ConfigurerOption, ConfigurerOptionSet};
pub use console::{ConsoleModel, ConsoleSet};
pub use java::{class_literal, java_source_name, package_of, simple_name};
pub use option::{DefaultValue, OptionKind, OptionModel, json_type};
pub use transformer::{TransformerModel, TransformerSet};

use kiln_core::natural_order;

/// A model identified by a name within its artifact kind.
pub trait Named {
    fn name(&self) -> &str;

    /// Tie breaker when two names differ only in case.
    fn java_type(&self) -> &str;
}

/// Models of one kind in natural order of their names.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSet<T> {
    items: Vec<T>,
}

impl<T: Named> NamedSet<T> {
    /// Sort `items` into natural order.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by(|a, b| natural_order(a.name(), a.java_type(), b.name(), b.java_type()));
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name().to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|i| i.name() == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for NamedSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, T> IntoIterator for &'a NamedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_set_natural_order() {
        let set = NamedSet::new(vec![
            ConsoleModel::new("b", "x.B"),
            ConsoleModel::new("A", "x.A"),
            ConsoleModel::new("c", "x.C"),
        ]);
        assert_eq!(set.names(), vec!["A", "b", "c"]);
        assert!(set.get("b").is_some());
        assert!(set.get("B").is_none());
    }
}
