use kiln_codegen::{
    GenerationContext, Goal, GoalError,
    extract::{ConsoleExtractor, Extractor},
    generation::{ArtifactRegistry, ServiceEntry},
};
use kiln_core::RenderedArtifact;
use kiln_index::SymbolSource;
use kiln_manifest::GoalConfig;

use super::{json_artifact, listing};
use crate::descriptors::ConsoleDescriptor;

/// Dev console service entries, descriptors and `dev-consoles.properties`.
#[derive(Debug, Clone)]
pub struct ConsoleGoal {
    config: GoalConfig,
    extractor: ConsoleExtractor,
}

impl ConsoleGoal {
    pub fn new(config: &GoalConfig) -> Self {
        let mut extractor = ConsoleExtractor::new();
        if let Some(marker) = &config.marker {
            extractor = extractor.with_marker(marker);
        }
        Self {
            config: config.clone(),
            extractor,
        }
    }
}

impl Default for ConsoleGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for ConsoleGoal {
    fn kind(&self) -> &'static str {
        "console"
    }

    fn configuration(&self) -> String {
        self.config.canonical()
    }

    fn require_symbols(&self) -> bool {
        self.config.require_symbols
    }

    fn markers(&self) -> Vec<String> {
        self.extractor.markers().into_iter().map(str::to_string).collect()
    }

    fn artifacts(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
    ) -> Result<Vec<RenderedArtifact>, GoalError> {
        let consoles = self.extractor.extract(source, ctx)?;
        let mut registry = ArtifactRegistry::new();
        for console in &consoles {
            registry.register(&ServiceEntry::new(
                "dev-console",
                &console.name,
                &console.java_type,
            ))?;
            let descriptor = ConsoleDescriptor::new(console, &ctx.project.coordinates);
            registry.push(json_artifact(descriptor.path(), &descriptor)?)?;
        }
        registry.register(&listing(
            "dev-consoles.properties",
            "dev-consoles",
            consoles.names(),
            ctx,
        ))?;
        Ok(registry.into_artifacts())
    }
}
