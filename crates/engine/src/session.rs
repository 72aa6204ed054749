//! One design-space document's engine state.

use std::path::Path;
use std::sync::Arc;

use varspace_glyph_math::MathGlyph;
use varspace_model::{Axes, Instancer, Location, ModelKind};

use crate::cache::{Mutator, MutatorCache};
use crate::error::Result;
use crate::kerning::{build_kerning_mutator, MathKerning};
use crate::registry::{FontLoader, SourceDescriptor, SourceRegistry};

/// The registry, glyph cache and kerning mutator of one document,
/// owned together. Hosts create one session per open design space;
/// there is no process-wide state.
pub struct DesignSpaceSession {
    registry: SourceRegistry,
    cache: MutatorCache,
    kerning: Option<Arc<Instancer<MathKerning>>>,
}

impl DesignSpaceSession {
    pub fn new(axes: Axes, sources: Vec<SourceDescriptor>) -> Self {
        Self {
            registry: SourceRegistry::new(axes, sources),
            cache: MutatorCache::new(ModelKind::Variable),
            kerning: None,
        }
    }

    pub fn with_loader(
        axes: Axes,
        sources: Vec<SourceDescriptor>,
        loader: Box<dyn FontLoader>,
    ) -> Self {
        Self {
            registry: SourceRegistry::with_loader(axes, sources, loader),
            cache: MutatorCache::new(ModelKind::Variable),
            kerning: None,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SourceRegistry {
        &mut self.registry
    }

    pub fn cache(&self) -> &MutatorCache {
        &self.cache
    }

    pub fn model_kind(&self) -> ModelKind {
        self.cache.model_kind()
    }

    pub fn set_model_kind(&mut self, kind: ModelKind) {
        self.cache.set_model_kind(kind);
        self.kerning = None;
    }

    pub fn default_location(&self) -> Location {
        self.registry.default_location()
    }

    /// Resolve backing fonts and rebuild the component dependency
    /// index. Idempotent unless `force_reload` is set.
    pub fn load_sources(&mut self, force_reload: bool) {
        self.registry.load_sources(force_reload);
        self.cache.rebuild_dependencies(&self.registry);
        self.kerning = None;
    }

    /// Interpolate one glyph at `location`. `Ok(None)` means the
    /// glyph's masters are incompatible; the host should surface that
    /// per glyph rather than treat it as a fault.
    pub fn glyph_instance(
        &mut self,
        glyph: &str,
        location: &Location,
        decompose: bool,
        bend: bool,
    ) -> Result<Option<MathGlyph>> {
        match self.cache.get(&self.registry, glyph, decompose)? {
            Mutator::Ready(instancer) => Ok(Some(instancer.make_instance(location, bend)?)),
            Mutator::Broken => Ok(None),
        }
    }

    /// Interpolate the kerning table at `location`, fitting the
    /// kerning mutator lazily on first use.
    pub fn kerning_instance(&mut self, location: &Location, bend: bool) -> Result<MathKerning> {
        let instancer = match &self.kerning {
            Some(instancer) => instancer.clone(),
            None => {
                let built =
                    Arc::new(build_kerning_mutator(self.cache.model_kind(), &self.registry)?);
                self.kerning = Some(built.clone());
                built
            }
        };
        Ok(instancer.make_instance(location, bend)?)
    }

    /// Host hook: a master glyph was edited. Drops the glyph's mutator
    /// and those of every composite that references it.
    pub fn glyph_changed(&mut self, glyph: &str) {
        self.cache.invalidate_transitive(glyph);
    }

    /// Host hook: a master's kerning was edited.
    pub fn kerning_changed(&mut self) {
        self.kerning = None;
    }

    /// Host hook: a font file was opened, saved or closed. Returns
    /// whether `path` backs a source of this document; when it does,
    /// sources are reloaded and every cache reset.
    pub fn font_changed(&mut self, path: &Path) -> bool {
        if !self.registry.is_relevant(path) {
            return false;
        }
        self.registry.load_sources(true);
        self.cache.rebuild_dependencies(&self.registry);
        self.cache.clear();
        self.kerning = None;
        true
    }
}
