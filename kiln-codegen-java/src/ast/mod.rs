//! Java declaration builders.

mod class;
mod method;
mod switch;

pub use class::JavaClass;
pub use method::Method;
pub use switch::{Case, Switch};
