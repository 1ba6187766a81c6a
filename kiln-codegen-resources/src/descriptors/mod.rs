//! JSON descriptor views.
//!
//! Field order of each view is the key order of the rendered JSON.

mod bean;
mod component;
mod console;
mod property;
mod transformer;

use std::path::PathBuf;

pub use bean::BeanDescriptor;
pub use component::ComponentDescriptor;
pub use console::ConsoleDescriptor;
pub use property::PropertyDescriptor;
pub use transformer::TransformerDescriptor;

use kiln_codegen::generation::file_name_of;

/// Descriptor tree of the Camel catalog.
pub const DESCRIPTOR_DIR: &str = "META-INF/org/apache/camel";

/// `META-INF/org/apache/camel/<kind>/<name>.json`
pub(crate) fn descriptor_path(kind: &str, name: &str) -> PathBuf {
    PathBuf::from(DESCRIPTOR_DIR)
        .join(kind)
        .join(format!("{}.json", file_name_of(name)))
}

/// Text that is omitted from the JSON when empty.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
