//! Symbol records and marker values.

use std::fmt;

use indexmap::IndexMap;
use kiln_core::Coordinates;
use serde::Serialize;

/// A marker (annotation) instance with its explicitly set attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Fully qualified marker type name, e.g. `org.apache.camel.spi.UriEndpoint`.
    pub name: String,
    /// Attributes in declaration order.
    pub attributes: IndexMap<String, MarkerValue>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Value of a marker attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    /// Enum constant, e.g. `Category.CORE`.
    Enum {
        type_name: String,
        constant: String,
    },
    /// Class literal, stored as a Java type name.
    Class(String),
    Array(Vec<MarkerValue>),
    Nested(Marker),
}

impl MarkerValue {
    /// String content of `Str`, `Class` and `Enum` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MarkerValue::Str(s) | MarkerValue::Class(s) => Some(s),
            MarkerValue::Enum { constant, .. } => Some(constant),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MarkerValue::Bool(b) => Some(*b),
            MarkerValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MarkerValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Values of an array, or a single value as a one-element list.
    ///
    /// String values are split on commas, matching how list-like
    /// attributes are commonly written.
    pub fn as_str_list(&self) -> Vec<String> {
        match self {
            MarkerValue::Array(values) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            MarkerValue::Str(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            other => other.as_str().map(|s| vec![s.to_string()]).unwrap_or_default(),
        }
    }
}

impl fmt::Display for MarkerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerValue::Str(s) | MarkerValue::Class(s) => write!(f, "{}", s),
            MarkerValue::Bool(b) => write!(f, "{}", b),
            MarkerValue::Int(i) => write!(f, "{}", i),
            MarkerValue::Float(x) => write!(f, "{}", x),
            MarkerValue::Char(c) => write!(f, "{}", c),
            MarkerValue::Enum { constant, .. } => write!(f, "{}", constant),
            MarkerValue::Array(values) => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{}", items.join(","))
            }
            MarkerValue::Nested(marker) => write!(f, "@{}", marker.name),
        }
    }
}

impl From<&str> for MarkerValue {
    fn from(s: &str) -> Self {
        MarkerValue::Str(s.to_string())
    }
}

impl From<String> for MarkerValue {
    fn from(s: String) -> Self {
        MarkerValue::Str(s)
    }
}

impl From<bool> for MarkerValue {
    fn from(b: bool) -> Self {
        MarkerValue::Bool(b)
    }
}

impl From<i64> for MarkerValue {
    fn from(i: i64) -> Self {
        MarkerValue::Int(i)
    }
}

impl From<Vec<&str>> for MarkerValue {
    fn from(values: Vec<&str>) -> Self {
        MarkerValue::Array(values.into_iter().map(MarkerValue::from).collect())
    }
}

/// Kind of program element carrying a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Field,
    Method,
}

/// The program element a record describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Member name; `None` for classes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field type or method return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,
}

/// One program element carrying one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRecord {
    /// Fully qualified (binary) name of the declaring class.
    pub owner: String,
    pub element: Element,
    /// Fully qualified marker type name.
    pub marker: String,
    pub attributes: IndexMap<String, MarkerValue>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Coordinates>,
}

impl SymbolRecord {
    /// A record for a marker on a class.
    pub fn on_class(owner: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            element: Element {
                kind: ElementKind::Class,
                name: None,
                java_type: None,
            },
            marker: marker.into(),
            attributes: IndexMap::new(),
            deprecated: false,
            artifact: None,
        }
    }

    /// A record for a marker on a field.
    pub fn on_field(
        owner: impl Into<String>,
        field: impl Into<String>,
        java_type: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            element: Element {
                kind: ElementKind::Field,
                name: Some(field.into()),
                java_type: Some(java_type.into()),
            },
            ..Self::on_class(owner, marker)
        }
    }

    /// A record for a marker on a method.
    pub fn on_method(
        owner: impl Into<String>,
        method: impl Into<String>,
        return_type: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            element: Element {
                kind: ElementKind::Method,
                name: Some(method.into()),
                java_type: Some(return_type.into()),
            },
            ..Self::on_class(owner, marker)
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn artifact(mut self, artifact: Coordinates) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Look up an attribute value.
    pub fn get(&self, key: &str) -> Option<&MarkerValue> {
        self.attributes.get(key)
    }

    /// Look up a non-empty string attribute.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(MarkerValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(MarkerValue::as_bool)
    }

    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(MarkerValue::as_str_list).unwrap_or_default()
    }

    /// Simple name of the declaring class (`com.acme.Foo$Bar` -> `Bar`).
    pub fn owner_simple_name(&self) -> &str {
        let tail = self.owner.rsplit('.').next().unwrap_or(&self.owner);
        tail.rsplit('$').next().unwrap_or(tail)
    }

    /// Key used to order records deterministically.
    pub(crate) fn sort_key(&self) -> (&str, &str, ElementKind, &str) {
        (
            &self.marker,
            &self.owner,
            self.element.kind,
            self.element.name.as_deref().unwrap_or(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_list_from_array() {
        let value = MarkerValue::from(vec!["a", "b"]);
        assert_eq!(value.as_str_list(), vec!["a", "b"]);
    }

    #[test]
    fn test_str_list_from_comma_string() {
        let value = MarkerValue::from("consumer, advanced,");
        assert_eq!(value.as_str_list(), vec!["consumer", "advanced"]);
    }

    #[test]
    fn test_bool_from_string() {
        assert_eq!(MarkerValue::from("true").as_bool(), Some(true));
        assert_eq!(MarkerValue::from("nope").as_bool(), None);
    }

    #[test]
    fn test_get_str_ignores_empty() {
        let record = SymbolRecord::on_class("com.acme.Foo", "x.Bean")
            .attr("name", "")
            .attr("title", "Foo");
        assert_eq!(record.get_str("name"), None);
        assert_eq!(record.get_str("title"), Some("Foo"));
    }

    #[test]
    fn test_owner_simple_name() {
        let record = SymbolRecord::on_class("com.acme.Outer$Inner", "x.Bean");
        assert_eq!(record.owner_simple_name(), "Inner");
        let record = SymbolRecord::on_class("Plain", "x.Bean");
        assert_eq!(record.owner_simple_name(), "Plain");
    }

    #[test]
    fn test_display_enum_value() {
        let value = MarkerValue::Enum {
            type_name: "org.acme.Category".into(),
            constant: "CORE".into(),
        };
        assert_eq!(value.to_string(), "CORE");
    }
}
