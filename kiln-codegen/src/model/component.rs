use kiln_core::Coordinates;

use super::{OptionKind, OptionModel, java, simple_name};

/// Descriptor of one URI scheme of an endpoint class.
///
/// An endpoint declaring several comma separated schemes produces one
/// model per scheme; `alternative_schemes` lists all of them in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentModel {
    pub scheme: String,
    pub alternative_schemes: Vec<String>,
    pub extends_scheme: Option<String>,
    /// Always starts with `<scheme>:` for well formed endpoints.
    pub syntax: String,
    pub alternative_syntax: Option<String>,
    pub title: String,
    pub description: String,
    pub label: Option<String>,
    pub first_version: Option<String>,
    pub deprecated: bool,
    pub deprecation_note: Option<String>,
    /// Component class registered for the scheme, if indexed.
    pub component_class: Option<String>,
    pub endpoint_class: String,
    pub consumer_only: bool,
    pub producer_only: bool,
    pub lenient_properties: bool,
    pub artifact: Coordinates,
    /// `Metadata` members of the component class, in natural order.
    pub component_options: Vec<OptionModel>,
    /// Path options in syntax order, then parameters in natural order.
    pub options: Vec<OptionModel>,
}

impl ComponentModel {
    pub fn path_options(&self) -> impl Iterator<Item = &OptionModel> {
        self.options.iter().filter(|o| o.kind == OptionKind::Path)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &OptionModel> {
        self.options.iter().filter(|o| o.kind == OptionKind::Parameter)
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn secret_names(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.secret)
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Syntax without the leading scheme, if it starts with `<scheme>:`.
    pub fn syntax_tail(&self) -> Option<&str> {
        self.syntax
            .strip_prefix(self.scheme.as_str())
            .filter(|rest| rest.starts_with(':'))
    }

    pub fn endpoint_package(&self) -> &str {
        java::package_of(&self.endpoint_class)
    }

    pub fn endpoint_simple_name(&self) -> &str {
        simple_name(&self.endpoint_class)
    }
}

/// Names of the path placeholders of a syntax, in order.
///
/// `"ftp:host:port/directoryName"` yields `host`, `port`, `directoryName`.
pub fn syntax_placeholders(syntax: &str) -> Vec<&str> {
    let tail = syntax.split_once(':').map(|(_, t)| t).unwrap_or("");
    tail.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-' || c == '.'))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_placeholders() {
        assert_eq!(
            syntax_placeholders("ftp:host:port/directoryName"),
            vec!["host", "port", "directoryName"]
        );
        assert_eq!(syntax_placeholders("timer:timerName"), vec!["timerName"]);
        assert!(syntax_placeholders("noscheme").is_empty());
    }
}
