//! The generation pass: staleness gate, extraction, rendering and writing
//! for every configured goal.
//!
//! ```text
//! GenerationPass ──► StalenessTracker ──skip──► GoalReport::Skipped
//!        │
//!        └─► SymbolSource ─► Goal (extract + render) ─► ResourceWriter
//! ```

mod context;
mod diagnostic;
mod goal;
mod pass;
mod report;

pub use context::{GenerationContext, ProjectInfo};
pub use diagnostic::{Diagnostic, Severity};
pub use goal::{Goal, GoalError};
pub use pass::{GenerationPass, Preview};
pub use report::{GoalReport, GoalStatus, PassReport};
