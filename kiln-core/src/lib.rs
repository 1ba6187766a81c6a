//! Core utilities and types for the kiln generation engine.
//!
//! This crate provides the pieces shared by every generator: the
//! [`GeneratedFile`] trait, the idempotent [`ResourceWriter`], build
//! notification hooks, artifact coordinates and naming helpers.

mod coordinates;
mod file;
mod notify;
mod utils;

pub use coordinates::Coordinates;
// File operations
pub use file::{
    GENERATED_MARKER, GeneratedFile, OutputLayout, OutputRoot, RenderError, RenderedArtifact,
    ResourceWriter, WriteError, WriteOutcome, WriteSummary, normalize_for_compare,
};
pub use notify::{BuildNotifier, LogNotifier, NoopNotifier, RecordingNotifier};
// String utilities
pub use utils::{
    camel_case_to_dash, capitalize, dash_to_camel_case, decapitalize, natural_order, to_title,
};

/// Version of the generator, used in fingerprints.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
