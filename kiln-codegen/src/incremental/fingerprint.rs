use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::pipeline::GenerationContext;

/// Digest of everything besides input files that affects a goal's output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub(crate) String);

impl Fingerprint {
    /// Hash the goal kind, its configuration, the project identity, the
    /// output roots and the tool version.
    pub fn compute(kind: &str, configuration: &str, ctx: &GenerationContext) -> Self {
        let mut hasher = Sha256::new();
        for part in [
            kind,
            configuration,
            &ctx.project.coordinates.to_string(),
            ctx.project.name.as_deref().unwrap_or(""),
            ctx.project.description.as_deref().unwrap_or(""),
            &ctx.layout.java.display().to_string(),
            &ctx.layout.resources.display().to_string(),
            &ctx.tool_version,
        ] {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
