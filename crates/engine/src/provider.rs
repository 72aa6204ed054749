//! Font-like abstraction the engine reads masters through.
//!
//! The engine never talks to an editor or a file format directly; a
//! [`FontSource`] is anything that can hand out glyph geometry,
//! codepoints and kerning. Disk UFOs implement it (see
//! [`crate::ufo::UfoSource`]), and a host application can implement it
//! for its own open-document objects.

use std::collections::BTreeMap;
use std::path::Path;

use kurbo::Affine;
use log::warn;
use varspace_glyph_math::MathGlyph;

/// Read-only view of one master font.
pub trait FontSource {
    /// Backing file, if the source lives on disk.
    fn path(&self) -> Option<&Path>;

    fn units_per_em(&self) -> f64;

    fn glyph_names(&self) -> Vec<String>;

    fn has_glyph(&self, name: &str) -> bool;

    /// The interpolatable geometry of one glyph, or `None` if the
    /// source does not contain it.
    fn math_glyph(&self, name: &str) -> Option<MathGlyph>;

    /// Base-glyph names referenced by `name`'s components.
    fn component_refs(&self, name: &str) -> Vec<String> {
        self.math_glyph(name)
            .map(|glyph| glyph.component_bases().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Character-to-glyph-name mapping.
    fn codepoint_map(&self) -> BTreeMap<char, String>;

    /// Flat pair kerning, group references already resolved away.
    fn kerning(&self) -> BTreeMap<(String, String), f64>;
}

/// Nesting deeper than this is treated as a reference cycle.
const MAX_COMPONENT_DEPTH: usize = 16;

/// Flatten glyph `name` into pure outlines, recursively replacing each
/// component with its base glyph's contours under the composed
/// transform. Missing bases and reference cycles degrade to a warning
/// and a truncated outline rather than an error, matching how editors
/// render such glyphs.
pub fn decomposed_glyph(source: &dyn FontSource, name: &str) -> Option<MathGlyph> {
    let top = source.math_glyph(name)?;
    let mut flat = MathGlyph::empty(top.width);
    flatten(source, &top, Affine::IDENTITY, 0, &mut flat);
    Some(flat)
}

fn flatten(
    source: &dyn FontSource,
    glyph: &MathGlyph,
    transform: Affine,
    depth: usize,
    out: &mut MathGlyph,
) {
    if depth > MAX_COMPONENT_DEPTH {
        warn!("component nesting deeper than {MAX_COMPONENT_DEPTH}, outline truncated");
        return;
    }
    out.contours.extend(glyph.transformed(transform).contours);
    for component in &glyph.components {
        match source.math_glyph(&component.base) {
            Some(base) => {
                flatten(source, &base, transform * component.transform, depth + 1, out)
            }
            None => warn!("component references missing glyph '{}'", component.base),
        }
    }
}
