//! The source registry: descriptors for every master in the document
//! and the fonts resolved for them.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use varspace_model::{Axes, Location};

use crate::error::Result;
use crate::provider::FontSource;
use crate::ufo::UfoSource;

/// Identifies one master: where it sits in the design space and which
/// file (and layer) backs it.
///
/// Source names are display labels, not identifiers. Two sources may
/// share a name while referencing different layers of one file, and
/// one file may appear at several locations.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub name: String,
    pub location: Location,
    pub path: Option<PathBuf>,
    pub layer: Option<String>,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, location: Location, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), location, path: Some(path.into()), layer: None }
    }

    /// A descriptor with no backing file yet; it will be reported as a
    /// problem on load but keeps its slot in the document.
    pub fn unbacked(name: impl Into<String>, location: Location) -> Self {
        Self { name: name.into(), location, path: None, layer: None }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

/// Resolves a descriptor's backing font. Pluggable so hosts and tests
/// can substitute their own font objects for disk loading.
pub trait FontLoader {
    fn load(&self, path: &Path, layer: Option<&str>) -> Result<Arc<dyn FontSource>>;
}

/// Loads UFOs from disk headlessly.
#[derive(Debug, Default)]
pub struct UfoLoader;

impl FontLoader for UfoLoader {
    fn load(&self, path: &Path, layer: Option<&str>) -> Result<Arc<dyn FontSource>> {
        Ok(Arc::new(UfoSource::load(path, layer)?))
    }
}

/// All sources of one design-space document and their resolved fonts.
///
/// Loading fails soft per source: an unreachable file becomes a
/// problem entry and the rest of the document stays usable. The axes
/// are fixed at construction; sources and fonts change only through
/// [`SourceRegistry::load_sources`].
pub struct SourceRegistry {
    axes: Axes,
    sources: Vec<SourceDescriptor>,
    fonts: Vec<Option<Arc<dyn FontSource>>>,
    /// Fonts the host has open in an editor, preferred over disk.
    open_fonts: HashMap<PathBuf, Arc<dyn FontSource>>,
    loader: Box<dyn FontLoader>,
    glyph_names: BTreeSet<String>,
    problems: Vec<String>,
    loaded: bool,
}

impl SourceRegistry {
    pub fn new(axes: Axes, sources: Vec<SourceDescriptor>) -> Self {
        Self::with_loader(axes, sources, Box::new(UfoLoader))
    }

    pub fn with_loader(
        axes: Axes,
        sources: Vec<SourceDescriptor>,
        loader: Box<dyn FontLoader>,
    ) -> Self {
        let fonts = sources.iter().map(|_| None).collect();
        Self {
            axes,
            sources,
            fonts,
            open_fonts: HashMap::new(),
            loader,
            glyph_names: BTreeSet::new(),
            problems: Vec::new(),
            loaded: false,
        }
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    pub fn default_location(&self) -> Location {
        self.axes.default_location()
    }

    /// Host hook: `font` is open in the editor; use it instead of
    /// loading its file from disk. Only sources on the default layer
    /// are substituted, layered sources always load their own view.
    pub fn register_open_font(&mut self, font: Arc<dyn FontSource>) {
        if let Some(path) = font.path() {
            self.open_fonts.insert(path.to_path_buf(), font);
        }
    }

    /// Host hook: the editor closed the font for `path`.
    pub fn forget_open_font(&mut self, path: &Path) {
        self.open_fonts.remove(path);
    }

    /// Resolve a backing font for every source that does not have one
    /// yet, or for every source when `force_reload` is set. Recomputes
    /// the glyph-name universe from the loaded fonts.
    pub fn load_sources(&mut self, force_reload: bool) {
        if self.loaded && !force_reload {
            return;
        }
        if force_reload {
            self.fonts = self.sources.iter().map(|_| None).collect();
            self.problems.clear();
        }
        for index in 0..self.sources.len() {
            if self.fonts[index].is_some() {
                continue;
            }
            let descriptor = self.sources[index].clone();
            let Some(path) = descriptor.path else {
                self.problems
                    .push(format!("can't load master for '{}': no path set", descriptor.name));
                continue;
            };
            if descriptor.layer.is_none() {
                if let Some(open) = self.open_fonts.get(&path) {
                    debug!("using open font for {}", path.display());
                    self.fonts[index] = Some(open.clone());
                    continue;
                }
            }
            match self.loader.load(&path, descriptor.layer.as_deref()) {
                Ok(font) => {
                    debug!("loaded master '{}' from {}", descriptor.name, path.display());
                    self.fonts[index] = Some(font);
                }
                Err(err) => {
                    self.problems.push(format!("can't load master '{}': {err}", descriptor.name));
                }
            }
        }
        self.glyph_names = self
            .fonts
            .iter()
            .flatten()
            .flat_map(|font| font.glyph_names())
            .collect();
        self.loaded = true;
        info!(
            "{} of {} sources loaded, {} glyphs",
            self.fonts.iter().flatten().count(),
            self.sources.len(),
            self.glyph_names.len()
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether `path` backs any source of this document.
    pub fn is_relevant(&self, path: &Path) -> bool {
        self.sources.iter().any(|source| source.path.as_deref() == Some(path))
    }

    /// The loaded font backing `path`, if any.
    pub fn resolve_font(&self, path: &Path) -> Option<Arc<dyn FontSource>> {
        self.fonts.iter().flatten().find(|font| font.path() == Some(path)).cloned()
    }

    /// Union of glyph names across all loaded sources.
    pub fn glyph_names(&self) -> &BTreeSet<String> {
        &self.glyph_names
    }

    /// Human-readable log of sources that could not be resolved.
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    /// Descriptor/font pairs for the sources that did load.
    pub fn loaded_fonts(
        &self,
    ) -> impl Iterator<Item = (&SourceDescriptor, &Arc<dyn FontSource>)> {
        self.sources
            .iter()
            .zip(&self.fonts)
            .filter_map(|(descriptor, font)| font.as_ref().map(|font| (descriptor, font)))
    }
}
