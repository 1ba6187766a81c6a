use std::collections::HashSet;

use kiln_core::{natural_order, to_title};
use kiln_index::{ElementKind, SymbolRecord, SymbolSource};
use tracing::debug;

use super::{
    ExtractionError, Extractor, class_records, markers, options::option_from_record, require,
};
use crate::{
    model::{ComponentModel, OptionKind, OptionModel, syntax_placeholders},
    pipeline::GenerationContext,
};

const KIND: &str = "component";

/// Group shown for an option with the given label.
///
/// The most specific (last) label wins; `x,advanced` becomes
/// `x (advanced)`, and a bare `advanced` on a consumer or producer only
/// endpoint is qualified with that role.
pub fn label_as_group_name(label: Option<&str>, consumer_only: bool, producer_only: bool) -> String {
    let fallback = if consumer_only {
        "consumer"
    } else if producer_only {
        "producer"
    } else {
        "common"
    };
    let Some(label) = label.filter(|l| !l.is_empty()) else {
        return fallback.to_string();
    };

    let labels: Vec<&str> = label.split(',').map(str::trim).collect();
    let group = match labels.as_slice() {
        [.., previous, "advanced"] if !previous.is_empty() => format!("{} (advanced)", previous),
        [.., last] => last.to_string(),
        [] => fallback.to_string(),
    };
    match group.as_str() {
        "advanced" if consumer_only => "consumer (advanced)".to_string(),
        "advanced" if producer_only => "producer (advanced)".to_string(),
        _ => group,
    }
}

/// Endpoint descriptors, one per scheme.
#[derive(Debug, Clone)]
pub struct ComponentExtractor {
    marker: String,
    path_marker: String,
    param_markers: Vec<String>,
    nested_marker: String,
}

impl Default for ComponentExtractor {
    fn default() -> Self {
        Self {
            marker: markers::URI_ENDPOINT.to_string(),
            path_marker: markers::URI_PATH.to_string(),
            param_markers: vec![markers::URI_PARAM.to_string()],
            nested_marker: markers::URI_PARAMS.to_string(),
        }
    }
}

impl ComponentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Replace the markers identifying query parameters.
    pub fn with_param_markers(mut self, markers: Vec<String>) -> Self {
        if !markers.is_empty() {
            self.param_markers = markers;
        }
        self
    }

    fn model(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
        record: &SymbolRecord,
    ) -> Result<Vec<ComponentModel>, ExtractionError> {
        let schemes: Vec<String> = require(KIND, record, "scheme")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let syntax = require(KIND, record, "syntax")?;
        let titles = record.get_list("title");
        let alternative_syntax = record.get_str("alternativeSyntax");
        let consumer_only = record.get_bool("consumerOnly").unwrap_or(false);
        let producer_only = record.get_bool("producerOnly").unwrap_or(false);

        let class_metadata = source
            .records_of(&record.owner)
            .into_iter()
            .find(|r| r.marker == markers::METADATA && r.element.kind == ElementKind::Class);
        let deprecated = record.deprecated
            || source.class(&record.owner).is_some_and(|c| c.deprecated);

        let options = self.options(source, &record.owner, syntax, consumer_only, producer_only);

        let models = schemes
            .iter()
            .enumerate()
            .map(|(i, scheme)| {
                let component_class = component_class(source, scheme);
                let component_options = component_class
                    .as_deref()
                    .map(|class| component_options(source, class, consumer_only, producer_only))
                    .unwrap_or_default();
                ComponentModel {
                    scheme: scheme.clone(),
                    alternative_schemes: if schemes.len() > 1 { schemes.clone() } else { Vec::new() },
                    extends_scheme: record.get_str("extendsScheme").map(str::to_string),
                    syntax: alias_syntax(scheme, syntax),
                    alternative_syntax: alternative_syntax.map(|s| alias_syntax(scheme, s)),
                    title: titles
                        .get(i)
                        .or(titles.first())
                        .cloned()
                        .unwrap_or_else(|| to_title(scheme)),
                    description: record
                        .get_str("description")
                        .or(ctx.project.description.as_deref())
                        .unwrap_or_default()
                        .to_string(),
                    label: record.get_str("label").map(str::to_string),
                    first_version: record.get_str("firstVersion").map(str::to_string),
                    deprecated,
                    deprecation_note: class_metadata
                        .and_then(|m| m.get_str("deprecationNote"))
                        .map(str::to_string),
                    component_class,
                    endpoint_class: record.owner.clone(),
                    consumer_only,
                    producer_only,
                    lenient_properties: record.get_bool("lenientProperties").unwrap_or(false),
                    artifact: ctx.project.coordinates.clone(),
                    component_options,
                    options: options.clone(),
                }
            })
            .collect();
        Ok(models)
    }

    /// Path options in syntax order followed by parameters in natural order.
    fn options(
        &self,
        source: &dyn SymbolSource,
        endpoint: &str,
        syntax: &str,
        consumer_only: bool,
        producer_only: bool,
    ) -> Vec<OptionModel> {
        let mut collected = Vec::new();
        let mut visited = HashSet::new();
        self.collect_options(source, endpoint, "", &mut collected, &mut visited);

        let mut names = HashSet::new();
        collected.retain(|o: &OptionModel| names.insert(o.name.clone()));
        for option in &mut collected {
            option.group = label_as_group_name(option.label.as_deref(), consumer_only, producer_only);
        }

        let placeholders = syntax_placeholders(syntax);
        let position = |name: &str| {
            placeholders
                .iter()
                .position(|p| *p == name)
                .unwrap_or(usize::MAX)
        };
        let (mut paths, mut params): (Vec<_>, Vec<_>) = collected
            .into_iter()
            .partition(|o| o.kind == OptionKind::Path);
        paths.sort_by(|a, b| {
            position(&a.name)
                .cmp(&position(&b.name))
                .then_with(|| natural_order(&a.name, "", &b.name, ""))
        });
        params.sort_by(|a, b| natural_order(&a.name, "", &b.name, ""));
        paths.extend(params);
        paths
    }

    fn collect_options(
        &self,
        source: &dyn SymbolSource,
        owner: &str,
        prefix: &str,
        out: &mut Vec<OptionModel>,
        visited: &mut HashSet<String>,
    ) {
        if !visited.insert(owner.to_string()) {
            return;
        }
        let markers = std::iter::once((self.path_marker.as_str(), OptionKind::Path)).chain(
            self.param_markers
                .iter()
                .map(|m| (m.as_str(), OptionKind::Parameter)),
        );
        for (marker, kind) in markers {
            for record in source.inherited_records(owner, marker) {
                if record.element.kind != ElementKind::Class {
                    out.push(option_from_record(source, record, kind, prefix));
                }
            }
        }

        for record in source.inherited_records(owner, &self.nested_marker) {
            let Some(nested) = record.element.java_type.as_deref() else {
                continue;
            };
            if record.element.kind == ElementKind::Class {
                continue;
            }
            let nested_prefix = format!("{}{}", prefix, record.get_str("prefix").unwrap_or_default());
            debug!(owner, nested, "collecting nested endpoint options");
            self.collect_options(source, nested, &nested_prefix, out, visited);
        }
    }
}

/// Rewrite `syntax` for an alternative scheme: the part before the first
/// `:` is replaced. A syntax without `:` is kept as is.
fn alias_syntax(scheme: &str, syntax: &str) -> String {
    match syntax.split_once(':') {
        Some((_, rest)) => format!("{}:{}", scheme, rest),
        None => syntax.to_string(),
    }
}

/// `Metadata` members of the component class in natural order.
///
/// Producer options are dropped for consumer only endpoints and consumer
/// options for producer only ones.
fn component_options(
    source: &dyn SymbolSource,
    class: &str,
    consumer_only: bool,
    producer_only: bool,
) -> Vec<OptionModel> {
    let mut options: Vec<_> = source
        .inherited_records(class, markers::METADATA)
        .into_iter()
        .filter(|r| r.element.kind != ElementKind::Class)
        .map(|r| {
            let mut option = option_from_record(source, r, OptionKind::Property, "");
            option.group = label_as_group_name(option.label.as_deref(), consumer_only, producer_only);
            option
        })
        .filter(|o| !(consumer_only && o.group == "producer" || producer_only && o.group == "consumer"))
        .collect();
    options.sort_by(|a, b| natural_order(&a.name, "", &b.name, ""));
    options.dedup_by(|a, b| a.name == b.name);
    options
}

fn component_class(source: &dyn SymbolSource, scheme: &str) -> Option<String> {
    class_records(source, markers::COMPONENT)
        .find(|r| r.get_list("value").iter().any(|s| s == scheme))
        .map(|r| r.owner.clone())
}

impl Extractor for ComponentExtractor {
    type Model = Vec<ComponentModel>;

    fn kind(&self) -> &'static str {
        KIND
    }

    fn markers(&self) -> Vec<&str> {
        vec![self.marker.as_str()]
    }

    fn extract(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
    ) -> Result<Self::Model, ExtractionError> {
        let mut models = Vec::new();
        for record in class_records(source, &self.marker) {
            models.extend(self.model(source, ctx, record)?);
        }
        models.sort_by(|a, b| natural_order(&a.scheme, &a.endpoint_class, &b.scheme, &b.endpoint_class));

        for pair in models.windows(2) {
            if pair[0].scheme == pair[1].scheme {
                return Err(ExtractionError::DuplicateName {
                    kind: KIND,
                    name: pair[0].scheme.clone(),
                    first: pair[0].endpoint_class.clone(),
                    second: pair[1].endpoint_class.clone(),
                });
            }
        }
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_as_group_name() {
        assert_eq!(label_as_group_name(None, false, false), "common");
        assert_eq!(label_as_group_name(Some(""), true, false), "consumer");
        assert_eq!(label_as_group_name(Some("producer"), false, false), "producer");
        assert_eq!(label_as_group_name(Some("consumer,advanced"), false, false), "consumer (advanced)");
        assert_eq!(label_as_group_name(Some("advanced"), false, true), "producer (advanced)");
        assert_eq!(label_as_group_name(Some("common,security"), false, false), "security");
    }

    #[test]
    fn test_alias_syntax() {
        assert_eq!(alias_syntax("sftp", "ftp:host:port"), "sftp:host:port");
        assert_eq!(alias_syntax("foo", "broken"), "broken");
    }
}
