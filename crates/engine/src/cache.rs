//! Lazy per-glyph mutator cache with dependency-aware invalidation.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use log::{debug, info, warn};
use varspace_glyph_math::MathGlyph;
use varspace_model::{Instancer, ModelKind};

use crate::error::{Error, Result};
use crate::provider::decomposed_glyph;
use crate::registry::SourceRegistry;

/// A fitted per-glyph model, or the explicit record that the glyph's
/// masters are not interpolatable.
#[derive(Clone)]
pub enum Mutator {
    Ready(Arc<Instancer<MathGlyph>>),
    /// Masters are topologically incompatible. Cached like a success
    /// so a known-broken glyph is not re-fitted on every query.
    Broken,
}

impl Mutator {
    pub fn is_broken(&self) -> bool {
        matches!(self, Mutator::Broken)
    }

    pub fn instancer(&self) -> Option<&Arc<Instancer<MathGlyph>>> {
        match self {
            Mutator::Ready(instancer) => Some(instancer),
            Mutator::Broken => None,
        }
    }
}

/// Caches one mutator per (glyph, decompose-flag) pair.
///
/// Entries move through three states: absent, then cached (ready or
/// broken) after the first query, then absent again after
/// invalidation. Model-build errors are returned but never cached, so
/// a later query retries the build.
pub struct MutatorCache {
    kind: ModelKind,
    entries: HashMap<(String, bool), Mutator>,
    /// base glyph name -> glyphs that use it as a component
    dependents: BTreeMap<String, BTreeSet<String>>,
}

impl MutatorCache {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind, entries: HashMap::new(), dependents: BTreeMap::new() }
    }

    pub fn model_kind(&self) -> ModelKind {
        self.kind
    }

    /// Switching the model kind drops every entry; the two models
    /// produce different instances and must not mix within a session.
    pub fn set_model_kind(&mut self, kind: ModelKind) {
        if kind != self.kind {
            info!("switching model kind to {kind:?}, dropping {} mutators", self.entries.len());
            self.kind = kind;
            self.clear();
        }
    }

    /// The mutator for `glyph`, fitting and caching it on first use.
    pub fn get(
        &mut self,
        registry: &SourceRegistry,
        glyph: &str,
        decompose: bool,
    ) -> Result<Mutator> {
        let key = (glyph.to_string(), decompose);
        if let Some(entry) = self.entries.get(&key) {
            return Ok(entry.clone());
        }
        let built = self.build(registry, glyph, decompose)?;
        self.entries.insert(key, built.clone());
        Ok(built)
    }

    fn build(&self, registry: &SourceRegistry, glyph: &str, decompose: bool) -> Result<Mutator> {
        if !registry.glyph_names().contains(glyph) {
            return Err(Error::UnknownGlyph(glyph.to_string()));
        }
        let mut samples = Vec::new();
        for (descriptor, font) in registry.loaded_fonts() {
            if !font.has_glyph(glyph) {
                continue;
            }
            let math = if decompose {
                decomposed_glyph(font.as_ref(), glyph)
            } else {
                font.math_glyph(glyph)
            };
            if let Some(math) = math {
                samples.push((descriptor.location.clone(), math));
            }
        }
        if let Some((_, first)) = samples.first() {
            for (location, sample) in &samples[1..] {
                if let Err(mismatch) = first.check_compatible(sample) {
                    warn!("glyph '{glyph}' is not interpolatable at [{location}]: {mismatch}");
                    return Ok(Mutator::Broken);
                }
            }
        }
        let instancer =
            Instancer::build(self.kind, registry.axes(), samples, &registry.default_location())?;
        debug!("fitted mutator for '{glyph}' (decompose: {decompose})");
        Ok(Mutator::Ready(Arc::new(instancer)))
    }

    /// Drop both decomposition variants of one glyph.
    pub fn invalidate(&mut self, glyph: &str) {
        self.entries.remove(&(glyph.to_string(), false));
        self.entries.remove(&(glyph.to_string(), true));
    }

    /// Drop a glyph and every composite that reaches it through the
    /// component graph, nested references included.
    pub fn invalidate_transitive(&mut self, glyph: &str) {
        let mut queue = vec![glyph.to_string()];
        let mut seen = BTreeSet::new();
        while let Some(name) = queue.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(users) = self.dependents.get(&name) {
                queue.extend(users.iter().cloned());
            }
        }
        for name in &seen {
            self.invalidate(name);
        }
        debug!("invalidated {} mutators for '{glyph}'", seen.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, glyph: &str, decompose: bool) -> bool {
        self.entries.contains_key(&(glyph.to_string(), decompose))
    }

    /// Recompute the reverse component index from the loaded fonts.
    /// Call after every (re)load of the registry.
    pub fn rebuild_dependencies(&mut self, registry: &SourceRegistry) {
        let mut dependents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (_, font) in registry.loaded_fonts() {
            for name in font.glyph_names() {
                for base in font.component_refs(&name) {
                    dependents.entry(base).or_default().insert(name.clone());
                }
            }
        }
        self.dependents = dependents;
    }
}
