use kiln_core::{Coordinates, OutputLayout, TOOL_VERSION};

/// Identity of the project artifacts are generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub coordinates: Coordinates,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectInfo {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Read-only inputs shared by every goal of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub project: ProjectInfo,
    pub layout: OutputLayout,
    pub tool_version: String,
}

impl GenerationContext {
    pub fn new(project: ProjectInfo, layout: OutputLayout) -> Self {
        Self {
            project,
            layout,
            tool_version: TOOL_VERSION.to_string(),
        }
    }

    pub fn with_tool_version(mut self, version: impl Into<String>) -> Self {
        self.tool_version = version.into();
        self
    }
}
