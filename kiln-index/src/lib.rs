//! Symbol index for the kiln generation engine.
//!
//! This crate turns compiled class files into plain data records that the
//! extractors query by marker name. It is rebuilt fresh on every pass.
//!
//! # Architecture
//!
//! ```text
//! classes dir / jars → Scanner (class-file parsing) → SymbolIndex → SymbolSource queries
//! ```
//!
//! Extractors only depend on the [`SymbolSource`] trait, so hosts may feed
//! records from any indexer.

mod classfile;
mod error;
mod index;
mod record;
mod scan;
mod source;

pub use classfile::{ClassParseError, ParsedClass, ParsedMember, parse_class};
pub use error::IndexError;
pub use index::{IndexBuilder, SymbolIndex};
pub use record::{Element, ElementKind, Marker, MarkerValue, SymbolRecord};
pub use scan::{ScanRoot, ScanStats, Scanner};
pub use source::{ClassInfo, Setter, SymbolSource};
