use std::path::PathBuf;

use kiln_codegen::model::ConsoleModel;
use kiln_core::Coordinates;
use serde::Serialize;

use super::descriptor_path;

/// `META-INF/org/apache/camel/dev-console/<name>.json`
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleDescriptor {
    console: ConsoleInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsoleInfo {
    kind: &'static str,
    group: String,
    name: String,
    title: String,
    description: String,
    deprecated: bool,
    java_type: String,
    group_id: String,
    artifact_id: String,
    version: String,
}

impl ConsoleDescriptor {
    pub fn new(model: &ConsoleModel, artifact: &Coordinates) -> Self {
        Self {
            console: ConsoleInfo {
                kind: "console",
                group: model.group.clone(),
                name: model.name.clone(),
                title: model.title.clone(),
                description: model.description.clone(),
                deprecated: model.deprecated,
                java_type: model.java_type.clone(),
                group_id: artifact.group.clone(),
                artifact_id: artifact.artifact.clone(),
                version: artifact.version.clone(),
            },
        }
    }

    pub fn path(&self) -> PathBuf {
        descriptor_path("dev-console", &self.console.name)
    }
}
