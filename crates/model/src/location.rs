//! Locations: points in the design space.

use std::{collections::BTreeMap, fmt};

/// A mapping from axis name to value.
///
/// A location may be partial (missing axes) while being merged or
/// split; a complete location has a value for every axis of the space.
/// Two locations are equal iff every axis value compares equal,
/// independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    values: BTreeMap<String, f64>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self { values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }

    pub fn get(&self, axis: &str) -> Option<f64> {
        self.values.get(axis).copied()
    }

    pub fn contains(&self, axis: &str) -> bool {
        self.values.contains_key(axis)
    }

    pub fn set(&mut self, axis: impl Into<String>, value: f64) {
        self.values.insert(axis.into(), value);
    }

    /// Builder-style `set`.
    pub fn with(mut self, axis: impl Into<String>, value: f64) -> Self {
        self.set(axis, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Combine two partial locations; values from `overrides` win.
    ///
    /// Typical use: a preview's discrete coordinate layered over the
    /// continuous coordinate of the font being edited.
    pub fn merge(&self, overrides: &Location) -> Location {
        let mut values = self.values.clone();
        for (k, v) in &overrides.values {
            values.insert(k.clone(), *v);
        }
        Location { values }
    }
}

impl FromIterator<(String, f64)> for Location {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}
