//! kiln.toml manifest parsing and validation.
//!
//! The manifest names the project being generated for, the inputs the
//! staleness tracker watches, the output trees, and per-goal options.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    BuildConfig, Dependency, GoalConfig, GoalsConfig, KilnToml, Manifest, OutputConfig,
    ProjectConfig,
};
