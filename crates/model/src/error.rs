//! Error types for design-space and model construction.

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by axis validation, normalization and model builds.
///
/// All of these are configuration errors the document author must fix;
/// the expected "masters are incompatible" outcome is not represented
/// here but as an explicit cache state in the engine layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Two axes share a name.
    #[error("duplicate axis name '{0}'")]
    DuplicateAxis(String),

    /// A continuous axis violates minimum <= default <= maximum.
    #[error("axis '{name}': range {minimum}..{default}..{maximum} is not ordered")]
    UnorderedAxis { name: String, minimum: f64, default: f64, maximum: f64 },

    /// A discrete axis does not list its own default.
    #[error("discrete axis '{name}' does not include its default {default}")]
    DefaultNotInValues { name: String, default: f64 },

    /// A value fell on a side of the default with zero width
    /// (minimum == default or default == maximum).
    #[error("axis '{0}' has a zero-width range on the queried side of its default")]
    DegenerateAxis(String),

    /// A location carries a value a discrete axis does not enumerate.
    #[error("{value} is not a valid value for discrete axis '{axis}'")]
    InvalidDiscreteValue { axis: String, value: f64 },

    /// A model build was attempted with an empty sample list.
    #[error("no masters supplied")]
    NoMasters,

    /// No sample sits at the bias location of its discrete sub-space.
    #[error("no master at the base location in sub-space [{0}]")]
    NoBaseMaster(String),

    /// A query addressed a discrete sub-space without any masters.
    #[error("no masters in the discrete sub-space [{0}]")]
    EmptySubspace(String),
}
