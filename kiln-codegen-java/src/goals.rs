//! Goals producing Java sources.

use std::collections::HashSet;

use kiln_codegen::{
    GenerationContext, Goal, GoalError,
    extract::{ComponentExtractor, ConfigurerExtractor, Extractor},
    generation::{ArtifactRegistry, ServiceEntry},
};
use kiln_core::RenderedArtifact;
use kiln_index::SymbolSource;
use kiln_manifest::GoalConfig;
use tracing::debug;

use crate::files::{EndpointUriFactory, PropertyConfigurer};

/// Property configurers for classes marked `@Configurer` and for the
/// classes listed in the goal options.
#[derive(Debug, Clone)]
pub struct ConfigurerGoal {
    config: GoalConfig,
    extractor: ConfigurerExtractor,
}

impl ConfigurerGoal {
    pub fn new(config: &GoalConfig) -> Self {
        let mut extractor = ConfigurerExtractor::new().with_classes(config.classes.clone());
        if let Some(marker) = &config.marker {
            extractor = extractor.with_marker(marker);
        }
        Self {
            config: config.clone(),
            extractor,
        }
    }
}

impl Default for ConfigurerGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for ConfigurerGoal {
    fn kind(&self) -> &'static str {
        "configurer"
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

    fn has_symbols(&self, source: &dyn SymbolSource) -> bool {
        !self.extractor.classes().is_empty()
            || self
                .extractor
                .markers()
                .iter()
                .any(|marker| !source.lookup(marker).is_empty())
    }

    fn artifacts(
        &self,
        source: &dyn SymbolSource,
        ctx: &GenerationContext,
    ) -> Result<Vec<RenderedArtifact>, GoalError> {
        let sets = self.extractor.extract(source, ctx)?;
        let mut registry = ArtifactRegistry::new();
        for set in &sets {
            debug!(target_class = %set.target, options = set.options.len(), "property configurer");
            registry.register(&PropertyConfigurer::new(set))?;
            registry.register(&ServiceEntry::new(
                "configurer",
                &set.target,
                set.configurer_fqcn(),
            ))?;
        }
        Ok(registry.into_artifacts())
    }
}

/// Endpoint URI factories, one per endpoint class, registered under
/// every scheme of the endpoint.
#[derive(Debug, Clone)]
pub struct UriFactoryGoal {
    config: GoalConfig,
    extractor: ComponentExtractor,
}

impl UriFactoryGoal {
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

impl Default for UriFactoryGoal {
    fn default() -> Self {
        Self::new(&GoalConfig::default())
    }
}

impl Goal for UriFactoryGoal {
    fn kind(&self) -> &'static str {
        "urifactory"
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
        let mut endpoints = HashSet::new();
        let mut registry = ArtifactRegistry::new();
        for model in &models {
            if !endpoints.insert(model.endpoint_class.as_str()) {
                continue;
            }
            let factory = EndpointUriFactory::new(model);
            debug!(endpoint = %model.endpoint_class, schemes = ?factory.schemes(), "uri factory");
            registry.register(&factory)?;
            for scheme in factory.schemes() {
                registry.register(&ServiceEntry::new("urifactory", scheme, factory.fqcn()))?;
            }
        }
        Ok(registry.into_artifacts())
    }
}
