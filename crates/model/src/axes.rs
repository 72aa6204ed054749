//! Axis definitions and the location algebra over them.

use crate::{
    error::{ModelError, Result},
    location::Location,
};

/// A continuous axis with an ordered minimum/default/maximum range and
/// an optional piecewise-linear mapping table applied before
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousAxis {
    pub name: String,
    pub minimum: f64,
    pub default: f64,
    pub maximum: f64,
    /// (input, output) pairs sorted by input; empty means identity.
    pub map: Vec<(f64, f64)>,
}

impl ContinuousAxis {
    pub fn new(name: impl Into<String>, minimum: f64, default: f64, maximum: f64) -> Self {
        Self { name: name.into(), minimum, default, maximum, map: Vec::new() }
    }

    pub fn with_map(mut self, map: Vec<(f64, f64)>) -> Self {
        self.map = map;
        self
    }

    /// Apply the mapping table. Inputs outside the table are pinned to
    /// the end outputs; inputs between entries interpolate linearly.
    pub fn map_forward(&self, value: f64) -> f64 {
        if self.map.is_empty() {
            return value;
        }
        let first = self.map[0];
        let last = self.map[self.map.len() - 1];
        if value <= first.0 {
            return first.1;
        }
        if value >= last.0 {
            return last.1;
        }
        for pair in self.map.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if value <= x1 {
                if x1 == x0 {
                    return y1;
                }
                return y0 + (y1 - y0) * (value - x0) / (x1 - x0);
            }
        }
        last.1
    }

    /// Map a user value to the signed unit range: values between
    /// minimum and default land in [-1, 0], between default and maximum
    /// in [0, 1]. Values beyond the extremes extrapolate; a value on a
    /// zero-width side of the default is a configuration error.
    pub fn normalize(&self, value: f64) -> Result<f64> {
        let v = self.map_forward(value);
        let minimum = self.map_forward(self.minimum);
        let default = self.map_forward(self.default);
        let maximum = self.map_forward(self.maximum);

        if v < default {
            if default <= minimum {
                return Err(ModelError::DegenerateAxis(self.name.clone()));
            }
            Ok((v - default) / (default - minimum))
        } else if v > default {
            if maximum <= default {
                return Err(ModelError::DegenerateAxis(self.name.clone()));
            }
            Ok((v - default) / (maximum - default))
        } else {
            Ok(0.0)
        }
    }
}

/// An axis with an enumerated set of valid values. Discrete axes
/// partition the space into sub-spaces that never interpolate across
/// each other.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteAxis {
    pub name: String,
    pub default: f64,
    pub values: Vec<f64>,
}

impl DiscreteAxis {
    pub fn new(name: impl Into<String>, default: f64, values: Vec<f64>) -> Self {
        Self { name: name.into(), default, values }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.values.iter().any(|&v| (v - value).abs() < 1e-9)
    }
}

/// One named dimension of the design space.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    Continuous(ContinuousAxis),
    Discrete(DiscreteAxis),
}

impl Axis {
    pub fn name(&self) -> &str {
        match self {
            Axis::Continuous(a) => &a.name,
            Axis::Discrete(a) => &a.name,
        }
    }

    pub fn default(&self) -> f64 {
        match self {
            Axis::Continuous(a) => a.default,
            Axis::Discrete(a) => a.default,
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Axis::Discrete(_))
    }
}

/// The validated, ordered axis list of one design space. Immutable
/// once the document is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    axes: Vec<Axis>,
}

impl Axes {
    /// Validate and freeze an axis list: names must be unique,
    /// continuous ranges ordered, discrete defaults enumerated.
    pub fn new(axes: Vec<Axis>) -> Result<Self> {
        for (i, axis) in axes.iter().enumerate() {
            if axes[..i].iter().any(|other| other.name() == axis.name()) {
                return Err(ModelError::DuplicateAxis(axis.name().to_string()));
            }
            match axis {
                Axis::Continuous(a) => {
                    if !(a.minimum <= a.default && a.default <= a.maximum) {
                        return Err(ModelError::UnorderedAxis {
                            name: a.name.clone(),
                            minimum: a.minimum,
                            default: a.default,
                            maximum: a.maximum,
                        });
                    }
                }
                Axis::Discrete(a) => {
                    if !a.contains(a.default) {
                        return Err(ModelError::DefaultNotInValues {
                            name: a.name.clone(),
                            default: a.default,
                        });
                    }
                }
            }
        }
        Ok(Self { axes })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axis> {
        self.axes.iter()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Axis> {
        self.axes.iter().find(|a| a.name() == name)
    }

    pub fn continuous(&self) -> impl Iterator<Item = &ContinuousAxis> {
        self.axes.iter().filter_map(|a| match a {
            Axis::Continuous(c) => Some(c),
            Axis::Discrete(_) => None,
        })
    }

    pub fn discrete(&self) -> impl Iterator<Item = &DiscreteAxis> {
        self.axes.iter().filter_map(|a| match a {
            Axis::Discrete(d) => Some(d),
            Axis::Continuous(_) => None,
        })
    }

    /// The location with every axis at its default value.
    pub fn default_location(&self) -> Location {
        self.axes.iter().map(|a| (a.name().to_string(), a.default())).collect()
    }

    /// Partition a location into its continuous and discrete parts.
    /// Axis names the space does not define are dropped.
    pub fn split(&self, location: &Location) -> (Location, Location) {
        let mut continuous = Location::new();
        let mut discrete = Location::new();
        for (name, value) in location.iter() {
            match self.get(name) {
                Some(Axis::Continuous(_)) => continuous.set(name, value),
                Some(Axis::Discrete(_)) => discrete.set(name, value),
                None => {}
            }
        }
        (continuous, discrete)
    }

    /// Normalize the continuous axes of a location into a dense vector
    /// in axis order. Missing axes sit at their default (0.0).
    pub fn normalize_continuous(&self, location: &Location) -> Result<Vec<f64>> {
        self.continuous()
            .map(|axis| match location.get(&axis.name) {
                Some(value) => axis.normalize(value),
                None => Ok(0.0),
            })
            .collect()
    }

    /// Normalize a location: continuous values to their signed unit
    /// range, discrete values passed through unchanged.
    pub fn normalize(&self, location: &Location) -> Result<Location> {
        let mut out = Location::new();
        for (name, value) in location.iter() {
            match self.get(name) {
                Some(Axis::Continuous(axis)) => out.set(name, axis.normalize(value)?),
                Some(Axis::Discrete(_)) | None => out.set(name, value),
            }
        }
        Ok(out)
    }
}
