use kiln_codegen::{
    GenerationContext, Goal, GoalError,
    extract::{ComponentExtractor, Extractor},
    generation::{ArtifactRegistry, ServiceEntry},
};
use kiln_core::RenderedArtifact;
use kiln_index::SymbolSource;
use kiln_manifest::GoalConfig;
use tracing::debug;

use super::{json_artifact, listing};
use crate::descriptors::ComponentDescriptor;

/// Component descriptors per scheme, service entries for the schemes
/// with a component class, and `component.properties`.
#[derive(Debug, Clone)]
pub struct ComponentGoal {
    config: GoalConfig,
    extractor: ComponentExtractor,
}

impl ComponentGoal {
    pub fn new(config: &GoalConfig) -> Self {
        let mut extractor =
            ComponentExtractor::new().with_param_markers(config.option_markers.clone());
        if let Some(marker) = &config.marker {
            extractor = extractor.with_marker(marker);
        }
        Self {
            config: config.clone(),
            extractor,
        }
    }
}

impl Default for ComponentGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for ComponentGoal {
    fn kind(&self) -> &'static str {
        "component"
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
        let models = self.extractor.extract(source, ctx)?;
        let mut registry = ArtifactRegistry::new();
        for model in &models {
            debug!(scheme = %model.scheme, options = model.options.len(), "component descriptor");
            let descriptor = ComponentDescriptor::new(model);
            registry.push(json_artifact(descriptor.path(), &descriptor)?)?;
            if let Some(class) = &model.component_class {
                registry.register(&ServiceEntry::new("component", &model.scheme, class))?;
            }
        }
        let schemes = models.iter().map(|m| m.scheme.clone()).collect();
        registry.register(&listing("component.properties", "components", schemes, ctx))?;
        Ok(registry.into_artifacts())
    }
}
