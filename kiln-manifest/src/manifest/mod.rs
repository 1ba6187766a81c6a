//! Manifest types and parsing for kiln.toml files.

mod file;
mod goals;
mod parse;

use std::path::PathBuf;

pub use file::KilnToml;
pub use goals::{GoalConfig, GoalsConfig};
use kiln_core::Coordinates;
use serde::Deserialize;

/// Root manifest for kiln.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Identity of the project being generated for
    pub project: ProjectConfig,

    /// Inputs of the generation pass
    #[serde(default)]
    pub build: BuildConfig,

    /// Output trees
    #[serde(default)]
    pub output: OutputConfig,

    /// Per artifact kind options
    #[serde(default)]
    pub goals: GoalsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Display name, used as a fallback title for component descriptors
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectConfig {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(&self.group, &self.artifact, &self.version)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Build directory; the staleness cache lives under `<directory>/kiln`
    #[serde(default = "default_build_dir")]
    pub directory: PathBuf,

    /// Compiled classes of the project. Defaults to `<directory>/classes`.
    pub classes: Option<PathBuf>,

    /// Source roots watched for staleness
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,

    /// Dependency archives or class directories
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            directory: default_build_dir(),
            classes: None,
            sources: default_sources(),
            dependencies: Vec::new(),
        }
    }
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("target")
}

fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("src/main/java")]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    pub path: PathBuf,
    /// `group:artifact:version` of the dependency
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_java_output")]
    pub java: PathBuf,
    #[serde(default = "default_resources_output")]
    pub resources: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            java: default_java_output(),
            resources: default_resources_output(),
        }
    }
}

fn default_java_output() -> PathBuf {
    PathBuf::from("src/generated/java")
}

fn default_resources_output() -> PathBuf {
    PathBuf::from("src/generated/resources")
}
