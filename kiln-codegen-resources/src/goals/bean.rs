use kiln_codegen::{
    GenerationContext, Goal, GoalError,
    extract::{BeanExtractor, Extractor},
    generation::ArtifactRegistry,
};
use kiln_core::RenderedArtifact;
use kiln_index::SymbolSource;
use kiln_manifest::GoalConfig;

use super::{json_artifact, listing};
use crate::descriptors::BeanDescriptor;

/// Bean descriptors and `bean.properties`.
#[derive(Debug, Clone)]
pub struct BeanGoal {
    config: GoalConfig,
    extractor: BeanExtractor,
}

impl BeanGoal {
    pub fn new(config: &GoalConfig) -> Self {
        let mut extractor = BeanExtractor::new();
        if let Some(marker) = &config.marker {
            extractor = extractor.with_marker(marker);
        }
        Self {
            config: config.clone(),
            extractor,
        }
    }
}

impl Default for BeanGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for BeanGoal {
    fn kind(&self) -> &'static str {
        "bean"
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
        let beans = self.extractor.extract(source, ctx)?;
        let mut registry = ArtifactRegistry::new();
        for bean in &beans {
            let descriptor = BeanDescriptor::new(bean, &ctx.project.coordinates);
            registry.push(json_artifact(descriptor.path(), &descriptor)?)?;
        }
        registry.register(&listing("bean.properties", "bean", beans.names(), ctx))?;
        Ok(registry.into_artifacts())
    }
}
