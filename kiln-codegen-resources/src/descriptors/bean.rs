use std::path::PathBuf;

use indexmap::IndexMap;
use kiln_codegen::{generation::{SERVICES_DIR, file_name_of}, model::BeanModel};
use kiln_core::Coordinates;
use serde::Serialize;

use super::{PropertyDescriptor, non_empty};

/// `META-INF/services/org/apache/camel/bean/<name>.json`
#[derive(Debug, Clone, Serialize)]
pub struct BeanDescriptor {
    bean: BeanInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BeanInfo {
    kind: &'static str,
    name: String,
    java_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    interface_type: Option<String>,
    title: String,
    description: String,
    deprecated: bool,
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, PropertyDescriptor>,
}

impl BeanDescriptor {
    pub fn new(model: &BeanModel, artifact: &Coordinates) -> Self {
        Self {
            bean: BeanInfo {
                kind: "bean",
                name: model.name.clone(),
                java_type: model.java_type.clone(),
                interface_type: non_empty(model.interface_type.as_deref()),
                title: model.title.clone(),
                description: model.description.clone(),
                deprecated: model.deprecated,
                group_id: artifact.group.clone(),
                artifact_id: artifact.artifact.clone(),
                version: artifact.version.clone(),
                properties: PropertyDescriptor::ungrouped(&model.properties),
            },
        }
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(SERVICES_DIR)
            .join("bean")
            .join(format!("{}.json", file_name_of(&self.bean.name)))
    }
}
