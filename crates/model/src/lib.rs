//! # Design-space model
//!
//! Axes, locations and variation models for interpolating between
//! masters placed in an N-dimensional design space.
//!
//! The [`Instancer`] is generic over the interpolated value: glyph
//! geometry, kerning tables, or any other type closed under `+`, `-`
//! and scalar `*`.
//!
//! ## Example
//!
//! ```
//! use varspace_model::{Axes, Axis, ContinuousAxis, Instancer, Location, ModelKind};
//!
//! let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
//!     "wght", 100.0, 400.0, 900.0,
//! ))])
//! .unwrap();
//!
//! let samples = vec![
//!     (Location::from_pairs([("wght", 400.0)]), 500.0),
//!     (Location::from_pairs([("wght", 900.0)]), 760.0),
//! ];
//! let instancer =
//!     Instancer::build(ModelKind::Variable, &axes, samples, &axes.default_location()).unwrap();
//!
//! let width = instancer
//!     .make_instance(&Location::from_pairs([("wght", 650.0)]), false)
//!     .unwrap();
//! assert!((width - 630.0).abs() < 1e-6);
//! ```

mod axes;
mod error;
mod location;
mod model;

pub use axes::{Axes, Axis, ContinuousAxis, DiscreteAxis};
pub use error::{ModelError, Result};
pub use location::Location;
pub use model::{Instancer, Interpolable, ModelKind, Region};
