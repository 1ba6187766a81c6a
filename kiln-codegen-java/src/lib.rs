//! Java source generators for kiln.
//!
//! Renders property configurers and endpoint URI factories through the
//! shared [`kiln_codegen::builder::CodeBuilder`], and provides the
//! [`ConfigurerGoal`] and [`UriFactoryGoal`] that drive them.

mod goals;
mod java_file;

pub mod ast;
pub mod files;

pub use goals::{ConfigurerGoal, UriFactoryGoal};
pub use java_file::JavaFile;
