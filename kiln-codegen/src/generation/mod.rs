//! Generated output building blocks shared by the Java and resource
//! generators.
//!
//! - [`ImportCollector`] - Java import tracking and ordering
//! - [`ArtifactRegistry`] - Rendered artifacts of one goal, written as a unit
//! - [`PropertiesFile`], [`Listing`] - `.properties` rendering
//! - [`ServiceEntry`] - `META-INF/services` registry entries
//! - [`to_json`] - Pretty JSON with a trailing newline

mod imports;
mod json;
mod properties;
mod registry;
mod service;

pub use imports::ImportCollector;
pub use json::to_json;
pub use properties::{Listing, PropertiesFile, escape_property};
pub use registry::ArtifactRegistry;
pub(crate) use registry::write_artifacts;
pub use service::{SERVICES_DIR, ServiceEntry, file_name_of};
