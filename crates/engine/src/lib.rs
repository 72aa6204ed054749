//! # Design-space interpolation engine
//!
//! The portable core of a design-space previewer: a registry of UFO
//! masters placed on validated axes, a lazy per-glyph mutator cache
//! with dependency-aware invalidation, and interpolated kerning.
//!
//! A host (editor plugin, CLI, server) owns a [`DesignSpaceSession`]
//! per document and feeds it change notifications; the session answers
//! glyph and kerning queries at arbitrary design-space locations.

mod cache;
mod error;
mod kerning;
mod provider;
mod registry;
mod session;
mod ufo;

pub use cache::{Mutator, MutatorCache};
pub use error::{Error, Result};
pub use kerning::{build_kerning_mutator, MathKerning};
pub use provider::{decomposed_glyph, FontSource};
pub use registry::{FontLoader, SourceDescriptor, SourceRegistry, UfoLoader};
pub use session::DesignSpaceSession;
pub use ufo::{from_norad_glyph, to_norad_glyph, UfoSource};

pub use varspace_glyph_math::{
    MathComponent, MathContour, MathGlyph, MathPoint, Mismatch, PointKind,
};
pub use varspace_model::{
    Axes, Axis, ContinuousAxis, DiscreteAxis, Instancer, Location, ModelError, ModelKind,
};
