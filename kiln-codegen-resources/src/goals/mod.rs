//! Goals producing resource files.

mod bean;
mod component;
mod console;
mod transformer;

use std::path::PathBuf;

pub use bean::BeanGoal;
pub use component::ComponentGoal;
pub use console::ConsoleGoal;
use kiln_codegen::{
    GenerationContext, GoalError,
    generation::{Listing, SERVICES_DIR, to_json},
};
use kiln_core::{OutputRoot, RenderedArtifact};
use serde::Serialize;
pub use transformer::TransformerGoal;

/// Render a descriptor into a resource artifact.
pub(crate) fn json_artifact<T: Serialize>(
    path: PathBuf,
    descriptor: &T,
) -> Result<RenderedArtifact, GoalError> {
    let content = to_json(descriptor).map_err(|source| GoalError::Serialize {
        path: path.clone(),
        source,
    })?;
    Ok(RenderedArtifact::new(OutputRoot::Resources, path, content))
}

/// Aggregate listing of one artifact kind, trailed by the project identity.
pub(crate) fn listing(file: &str, key: &str, names: Vec<String>, ctx: &GenerationContext) -> Listing {
    let coordinates = &ctx.project.coordinates;
    Listing::new(PathBuf::from(SERVICES_DIR).join(file), key, names)
        .entry("groupId", &coordinates.group)
        .entry("artifactId", &coordinates.artifact)
        .entry("version", &coordinates.version)
        .optional("projectName", ctx.project.name.as_deref())
        .optional("projectDescription", ctx.project.description.as_deref())
}
