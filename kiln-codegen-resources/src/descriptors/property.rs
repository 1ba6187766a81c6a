use indexmap::IndexMap;
use kiln_codegen::model::{DefaultValue, OptionKind, OptionModel};
use serde::Serialize;

use super::non_empty;

/// One entry of a descriptor's `properties` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub index: usize,
    pub kind: OptionKind,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub json_type: &'static str,
    pub java_type: String,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<String>,
    pub deprecated: bool,
    pub secret: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    pub description: String,
}

impl PropertyDescriptor {
    pub fn new(index: usize, option: &OptionModel) -> Self {
        Self {
            index,
            kind: option.kind,
            display_name: option.display_name.clone(),
            group: Some(option.group.clone()),
            label: non_empty(option.label.as_deref()),
            required: option.required,
            json_type: option.json_type(),
            java_type: option.java_type.clone(),
            enums: option.enums.clone(),
            deprecated: option.deprecated,
            secret: option.secret,
            default_value: option.default_value.clone(),
            description: option.description.clone(),
        }
    }

    /// Properties keyed by name, in the order given.
    pub fn map(options: &[OptionModel]) -> IndexMap<String, PropertyDescriptor> {
        options
            .iter()
            .enumerate()
            .map(|(i, option)| (option.name.clone(), Self::new(i, option)))
            .collect()
    }

    /// Like [`PropertyDescriptor::map`] without groups, for beans.
    pub fn ungrouped(options: &[OptionModel]) -> IndexMap<String, PropertyDescriptor> {
        let mut map = Self::map(options);
        for property in map.values_mut() {
            property.group = None;
        }
        map
    }
}
