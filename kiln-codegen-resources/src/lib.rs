//! Resource generators for kiln.
//!
//! JSON descriptors are serde views over the models of `kiln-codegen`,
//! written next to service registry entries and one aggregate listing
//! per artifact kind.

pub mod descriptors;
mod goals;

pub use goals::{BeanGoal, ComponentGoal, ConsoleGoal, TransformerGoal};
