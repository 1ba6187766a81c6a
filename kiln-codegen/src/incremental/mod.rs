//! Incremental generation: decide whether a goal can be skipped.
//!
//! A goal is up to date when a cache record exists for it, the record's
//! fingerprint matches the current configuration, and no watched input
//! changed after the record was last written.

mod cache;
mod fingerprint;
mod inputs;
mod tracker;

pub use cache::{CacheError, CacheRecord};
pub use fingerprint::Fingerprint;
pub use inputs::{InputSet, dos_time_to_system_time};
pub use tracker::{Staleness, StalenessTracker};
