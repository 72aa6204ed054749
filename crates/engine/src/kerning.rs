//! Pair kerning as an interpolatable value.

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

use varspace_model::{Instancer, ModelKind};

use crate::error::Result;
use crate::registry::SourceRegistry;

/// A flat pair-kerning table closed under glyph math.
///
/// Pairs absent from an operand contribute zero rather than making the
/// operands incompatible, so sparse tables interpolate without any
/// topology check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathKerning {
    pairs: BTreeMap<(String, String), f64>,
}

impl MathKerning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = ((S, S), f64)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|((left, right), value)| ((left.into(), right.into()), value))
                .collect(),
        }
    }

    pub fn from_flat(pairs: BTreeMap<(String, String), f64>) -> Self {
        Self { pairs }
    }

    /// The kerning value for a pair; unkerned pairs are zero.
    pub fn get(&self, left: &str, right: &str) -> f64 {
        self.pairs.get(&(left.to_string(), right.to_string())).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), f64)> {
        self.pairs.iter().map(|(pair, value)| (pair, *value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn zip_with(&self, other: &MathKerning, f: impl Fn(f64, f64) -> f64) -> MathKerning {
        let mut pairs = BTreeMap::new();
        for key in self.pairs.keys().chain(other.pairs.keys()) {
            if pairs.contains_key(key) {
                continue;
            }
            let a = self.pairs.get(key).copied().unwrap_or(0.0);
            let b = other.pairs.get(key).copied().unwrap_or(0.0);
            pairs.insert(key.clone(), f(a, b));
        }
        MathKerning { pairs }
    }
}

impl Add for MathKerning {
    type Output = MathKerning;

    fn add(self, rhs: MathKerning) -> MathKerning {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for MathKerning {
    type Output = MathKerning;

    fn sub(self, rhs: MathKerning) -> MathKerning {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Mul<f64> for MathKerning {
    type Output = MathKerning;

    fn mul(mut self, scalar: f64) -> MathKerning {
        for value in self.pairs.values_mut() {
            *value *= scalar;
        }
        self
    }
}

/// Fit one kerning mutator over every loaded source's flat table,
/// anchored at the default location like the glyph mutators.
pub fn build_kerning_mutator(
    kind: ModelKind,
    registry: &SourceRegistry,
) -> Result<Instancer<MathKerning>> {
    let samples = registry
        .loaded_fonts()
        .map(|(descriptor, font)| {
            (descriptor.location.clone(), MathKerning::from_flat(font.kerning()))
        })
        .collect();
    Ok(Instancer::build(kind, registry.axes(), samples, &registry.default_location())?)
}
