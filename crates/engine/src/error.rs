//! Error types for the interpolation engine.

use std::path::PathBuf;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine.
///
/// Note that two expected outcomes are deliberately not errors: a
/// source that fails to load becomes a problem entry on the registry,
/// and topologically incompatible masters become a broken cache entry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A query named a glyph no loaded source contains.
    #[error("no loaded source contains a glyph named '{0}'")]
    UnknownGlyph(String),

    /// A backing font could not be read from disk.
    #[error("failed to load source '{path}': {message}")]
    LoadSource { path: PathBuf, message: String },

    /// A descriptor referenced a layer the file does not have.
    #[error("source '{path}' has no layer named '{layer}'")]
    MissingLayer { path: PathBuf, layer: String },

    /// Axis configuration or model-build failure.
    #[error(transparent)]
    Model(#[from] varspace_model::ModelError),
}
