use std::path::PathBuf;

use kiln_codegen::model::TransformerModel;
use kiln_core::Coordinates;
use serde::Serialize;

use super::{descriptor_path, non_empty};

/// `META-INF/org/apache/camel/transformer/<name>.json`
#[derive(Debug, Clone, Serialize)]
pub struct TransformerDescriptor {
    transformer: TransformerInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransformerInfo {
    kind: &'static str,
    name: String,
    title: String,
    description: String,
    deprecated: bool,
    java_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    group_id: String,
    artifact_id: String,
    version: String,
}

impl TransformerDescriptor {
    pub fn new(model: &TransformerModel, artifact: &Coordinates) -> Self {
        Self {
            transformer: TransformerInfo {
                kind: "transformer",
                name: model.name.clone(),
                title: model.title.clone(),
                description: model.description.clone(),
                deprecated: model.deprecated,
                java_type: model.java_type.clone(),
                from: non_empty(model.from_type.as_deref()),
                to: non_empty(model.to_type.as_deref()),
                group_id: artifact.group.clone(),
                artifact_id: artifact.artifact.clone(),
                version: artifact.version.clone(),
            },
        }
    }

    pub fn path(&self) -> PathBuf {
        descriptor_path("transformer", &self.transformer.name)
    }
}
