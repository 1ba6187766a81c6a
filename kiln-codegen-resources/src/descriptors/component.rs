use std::path::PathBuf;

use indexmap::IndexMap;
use kiln_codegen::model::ComponentModel;
use serde::Serialize;

use super::{PropertyDescriptor, descriptor_path, non_empty};

/// `META-INF/org/apache/camel/component/<scheme>.json`
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDescriptor {
    component: ComponentInfo,
    #[serde(rename = "componentProperties")]
    component_properties: IndexMap<String, PropertyDescriptor>,
    properties: IndexMap<String, PropertyDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentInfo {
    kind: &'static str,
    name: String,
    title: String,
    description: String,
    deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    deprecation_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    java_type: Option<String>,
    group_id: String,
    artifact_id: String,
    version: String,
    scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends_scheme: Option<String>,
    syntax: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternative_syntax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternative_schemes: Option<String>,
    consumer_only: bool,
    producer_only: bool,
    lenient_properties: bool,
}

impl ComponentDescriptor {
    pub fn new(model: &ComponentModel) -> Self {
        let component = ComponentInfo {
            kind: "component",
            name: model.scheme.clone(),
            title: model.title.clone(),
            description: model.description.clone(),
            deprecated: model.deprecated,
            deprecation_note: non_empty(model.deprecation_note.as_deref()),
            first_version: non_empty(model.first_version.as_deref()),
            label: non_empty(model.label.as_deref()),
            java_type: model.component_class.clone(),
            group_id: model.artifact.group.clone(),
            artifact_id: model.artifact.artifact.clone(),
            version: model.artifact.version.clone(),
            scheme: model.scheme.clone(),
            extends_scheme: non_empty(model.extends_scheme.as_deref()),
            syntax: model.syntax.clone(),
            alternative_syntax: non_empty(model.alternative_syntax.as_deref()),
            alternative_schemes: (!model.alternative_schemes.is_empty())
                .then(|| model.alternative_schemes.join(",")),
            consumer_only: model.consumer_only,
            producer_only: model.producer_only,
            lenient_properties: model.lenient_properties,
        };
        Self {
            component,
            component_properties: PropertyDescriptor::map(&model.component_options),
            properties: PropertyDescriptor::map(&model.options),
        }
    }

    pub fn path(&self) -> PathBuf {
        descriptor_path("component", &self.component.scheme)
    }
}
