//! Shared generation engine for kiln.
//!
//! This crate sits between the symbol index and the concrete renderers
//! (`kiln-codegen-java`, `kiln-codegen-resources`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code building blocks (CodeBuilder, CodeFragment, Indent)
//! - [`generation`] - Output helpers (imports, JSON, properties, service entries)
//! - [`model`] - Typed models of every artifact kind
//! - [`extract`] - Model extractors over a [`kiln_index::SymbolSource`]
//! - [`incremental`] - Fingerprints, cache records and the staleness tracker
//! - [`pipeline`] - Goals and the generation pass
//! - [`testing`] - Test fixtures (feature-gated)

pub mod builder;
pub mod extract;
pub mod generation;
pub mod incremental;
pub mod model;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use extract::{ExtractionError, Extractor};
pub use pipeline::{
    Diagnostic, GenerationContext, GenerationPass, Goal, GoalError, GoalReport, GoalStatus,
    PassReport, ProjectInfo, Severity,
};
