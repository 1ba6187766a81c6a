use kiln_codegen::{
    GenerationContext, Goal, GoalError,
    extract::{Extractor, TransformerExtractor},
    generation::{ArtifactRegistry, ServiceEntry},
};
use kiln_core::RenderedArtifact;
use kiln_index::SymbolSource;
use kiln_manifest::GoalConfig;

use super::{json_artifact, listing};
use crate::descriptors::TransformerDescriptor;

/// Data type transformer service entries, descriptors and
/// `transformer.properties`.
#[derive(Debug, Clone)]
pub struct TransformerGoal {
    config: GoalConfig,
    extractor: TransformerExtractor,
}

impl TransformerGoal {
    pub fn new(config: &GoalConfig) -> Self {
        let mut extractor = TransformerExtractor::new();
        if let Some(marker) = &config.marker {
            extractor = extractor.with_marker(marker);
        }
        Self {
            config: config.clone(),
            extractor,
        }
    }
}

impl Default for TransformerGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for TransformerGoal {
    fn kind(&self) -> &'static str {
        "transformer"
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
        let transformers = self.extractor.extract(source, ctx)?;
        let mut registry = ArtifactRegistry::new();
        for transformer in &transformers {
            registry.register(&ServiceEntry::new(
                "transformer",
                &transformer.name,
                &transformer.java_type,
            ))?;
            let descriptor = TransformerDescriptor::new(transformer, &ctx.project.coordinates);
            registry.push(json_artifact(descriptor.path(), &descriptor)?)?;
        }
        registry.register(&listing(
            "transformer.properties",
            "transformers",
            transformers.names(),
            ctx,
        ))?;
        Ok(registry.into_artifacts())
    }
}
