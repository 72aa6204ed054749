//! Variation models: from master samples to instances.
//!
//! Implements the core algorithm for weighting master contributions at
//! arbitrary locations in the design space. Two interchangeable model
//! kinds live behind the same [`Instancer`] contract: the
//! piecewise-linear tent model used by variable fonts, and the legacy
//! scattered model with through-origin factors.

use std::{cmp::Ordering, collections::BTreeMap, ops::{Add, Mul, Sub}};

use log::debug;

use crate::{
    axes::Axes,
    error::{ModelError, Result},
    location::Location,
};

/// Anything a model can interpolate: closed under addition,
/// subtraction and scalar multiplication.
pub trait Interpolable:
    Clone + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> Interpolable for T where
    T: Clone + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}

/// Which delta-weighting scheme a model uses.
///
/// Kinds are not mixable within one session; the cache layer clears
/// wholesale when the active kind changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    /// Piecewise-linear tent supports, variable-font style. Exact at
    /// every master location.
    #[default]
    Variable,
    /// Legacy scattered model: per-axis factors linear through the
    /// origin. Exact at the base and at the outermost master of each
    /// axis; approximate at intermediate masters.
    Mutator,
}

/// A region in normalized variation space, one (start, peak, end)
/// tent per continuous axis. The contribution is 0 at start, 1 at
/// peak, 0 at end; a peak of 0 means the axis does not participate.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub axes: Vec<(f64, f64, f64)>,
    /// Per axis, whether masters sit on the opposite side of the
    /// origin. A tent never extrapolates across the origin when the
    /// other side has its own masters to describe it.
    opposite_masters: Vec<bool>,
}

impl Region {
    /// Build the tent for a master peak, with boundaries at the
    /// neighboring master positions so intermediate masters get their
    /// own piecewise segment.
    ///
    /// Per axis: on the positive side the tent runs from the previous
    /// master's peak out to the sampled extent of the axis; mirrored
    /// on the negative side. This greedy each-region-extends-to-the-
    /// edge shape is what makes delta accumulation reproduce every
    /// master exactly.
    pub fn from_peak_with_neighbors(peak: &[f64], all_locations: &[Vec<f64>]) -> Self {
        let mut axes = Vec::with_capacity(peak.len());
        let mut opposite_masters = Vec::with_capacity(peak.len());
        for (axis_idx, &p) in peak.iter().enumerate() {
            if p == 0.0 {
                axes.push((0.0, 0.0, 0.0));
                opposite_masters.push(false);
                continue;
            }
            let mut positions: Vec<f64> = all_locations
                .iter()
                .map(|loc| loc.get(axis_idx).copied().unwrap_or(0.0))
                .collect();
            positions.push(0.0);
            positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            positions.dedup();

            // Sampled extent of the axis, at least the unit range.
            // Peaks can sit outside [-1, 1] when the model is anchored
            // at a bias off the default.
            let lo = positions.first().copied().unwrap_or(0.0).min(-1.0);
            let hi = positions.last().copied().unwrap_or(0.0).max(1.0);

            if p > 0.0 {
                opposite_masters.push(positions.iter().any(|&x| x < 0.0));
                let side: Vec<f64> = positions.iter().filter(|&&x| x >= 0.0).copied().collect();
                axes.push(match side.iter().position(|&x| (x - p).abs() < 1e-9) {
                    Some(i) => {
                        let start = if i == 0 { 0.0 } else { side[i - 1] };
                        (start, p, hi)
                    }
                    None => (0.0, p, hi),
                });
            } else {
                opposite_masters.push(positions.iter().any(|&x| x > 0.0));
                let side: Vec<f64> = positions.iter().filter(|&&x| x <= 0.0).copied().collect();
                axes.push(match side.iter().position(|&x| (x - p).abs() < 1e-9) {
                    Some(i) => {
                        let end = if i + 1 >= side.len() { 0.0 } else { side[i + 1] };
                        (lo, p, end)
                    }
                    None => (lo, p, 0.0),
                });
            }
        }
        Self { axes, opposite_masters }
    }

    /// The scalar contribution of this region at a location, in [0, 1]
    /// for queries inside the support.
    ///
    /// With `extrapolate` set, queries beyond the sampled range
    /// continue the slope of the outermost linear segment instead of
    /// dropping to zero. The support still vanishes between interior
    /// segments and across the origin whenever the opposite side has
    /// its own masters, which keeps the model piecewise-linear inside
    /// the box and exact at every master.
    pub fn scalar_at(&self, location: &[f64], extrapolate: bool) -> f64 {
        let mut scalar = 1.0;
        for (i, &(start, peak, end)) in self.axes.iter().enumerate() {
            let loc = location.get(i).copied().unwrap_or(0.0);
            if peak == 0.0 {
                continue;
            }
            if loc == peak {
                continue;
            }
            let opposite = self.opposite_masters.get(i).copied().unwrap_or(false);
            let rising = |loc: f64| (loc - start) / (peak - start);
            let falling = |loc: f64| (end - loc) / (end - peak);
            if loc < start {
                if !extrapolate {
                    return 0.0;
                }
                // Left of the support: continue the nearest edge, or
                // stay zero past an interior segment boundary and
                // across a populated origin.
                if peak < 0.0 {
                    scalar *= if peak == start { falling(loc) } else { rising(loc) };
                } else if start == 0.0 && !opposite {
                    scalar *= rising(loc);
                } else {
                    return 0.0;
                }
            } else if loc > end {
                if !extrapolate {
                    return 0.0;
                }
                if peak > 0.0 {
                    scalar *= if peak == end { rising(loc) } else { falling(loc) };
                } else if end == 0.0 && !opposite {
                    scalar *= falling(loc);
                } else {
                    return 0.0;
                }
            } else if loc < peak {
                scalar *= rising(loc);
            } else {
                scalar *= falling(loc);
            }
        }
        scalar
    }
}

/// Per-master support function: how much a master's delta contributes
/// at a queried normalized location.
#[derive(Debug, Clone, PartialEq)]
enum Support {
    /// Tent-shaped, bounded (Variable kind).
    Tent(Region),
    /// Linear through the origin per participating axis (Mutator
    /// kind): factor = prod(loc[i] / peak[i]).
    Ray(Vec<f64>),
}

impl Support {
    fn scalar_at(&self, location: &[f64], extrapolate: bool) -> f64 {
        match self {
            Support::Tent(region) => region.scalar_at(location, extrapolate),
            Support::Ray(peak) => {
                let mut scalar = 1.0;
                for (i, &p) in peak.iter().enumerate() {
                    if p == 0.0 {
                        continue;
                    }
                    let loc = location.get(i).copied().unwrap_or(0.0);
                    scalar *= loc / p;
                }
                scalar
            }
        }
    }
}

/// Key identifying one discrete sub-space: the bit patterns of the
/// discrete axis values in axis order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SubspaceKey(Vec<u64>);

fn value_bits(value: f64) -> u64 {
    // Fold -0.0 onto 0.0 so both address the same sub-space.
    (if value == 0.0 { 0.0 } else { value }).to_bits()
}

fn subspace_key(axes: &Axes, discrete: &Location) -> Result<SubspaceKey> {
    let mut key = Vec::new();
    for axis in axes.discrete() {
        let value = discrete.get(&axis.name).unwrap_or(axis.default);
        if !axis.contains(value) {
            return Err(ModelError::InvalidDiscreteValue { axis: axis.name.clone(), value });
        }
        key.push(value_bits(value));
    }
    Ok(SubspaceKey(key))
}

/// The fitted model for one discrete sub-space.
#[derive(Debug, Clone)]
struct Submodel<V> {
    base: V,
    supports: Vec<Support>,
    deltas: Vec<V>,
    /// Per continuous axis, the [min, max] span of master peaks
    /// (always containing 0). Used by the bend clamp.
    bounds: Vec<(f64, f64)>,
}

fn sort_rank(location: &[f64]) -> (usize, f64) {
    let active = location.iter().filter(|v| **v != 0.0).count();
    let distance = location.iter().map(|v| v.abs()).sum();
    (active, distance)
}

impl<V: Interpolable> Submodel<V> {
    /// Fit one sub-space: order masters (fewer active axes first, then
    /// closer to the origin), build supports, and accumulate deltas so
    /// each master's value is reproduced net of the masters before it.
    fn build(kind: ModelKind, samples: Vec<(Vec<f64>, V)>, label: &str) -> Result<Self> {
        let locations: Vec<Vec<f64>> = samples.iter().map(|(loc, _)| loc.clone()).collect();
        let base_idx = locations
            .iter()
            .position(|loc| loc.iter().all(|v| v.abs() < 1e-6))
            .ok_or_else(|| ModelError::NoBaseMaster(label.to_string()))?;

        let mut order: Vec<usize> = (0..samples.len()).filter(|&i| i != base_idx).collect();
        order.sort_by(|&a, &b| {
            let (ca, da) = sort_rank(&locations[a]);
            let (cb, db) = sort_rank(&locations[b]);
            ca.cmp(&cb).then(da.partial_cmp(&db).unwrap_or(Ordering::Equal))
        });

        let supports: Vec<Support> = order
            .iter()
            .map(|&idx| match kind {
                ModelKind::Variable => {
                    Support::Tent(Region::from_peak_with_neighbors(&locations[idx], &locations))
                }
                ModelKind::Mutator => Support::Ray(locations[idx].clone()),
            })
            .collect();

        let base = samples[base_idx].1.clone();
        let mut deltas: Vec<V> = Vec::with_capacity(order.len());
        for (i, &idx) in order.iter().enumerate() {
            let peak = &locations[idx];
            let mut delta = samples[idx].1.clone() - base.clone();
            for (j, prev) in deltas.iter().enumerate().take(i) {
                let scalar = supports[j].scalar_at(peak, false);
                if scalar != 0.0 {
                    delta = delta - prev.clone() * scalar;
                }
            }
            deltas.push(delta);
        }

        let dims = locations.first().map_or(0, Vec::len);
        let mut bounds = vec![(0.0, 0.0); dims];
        for loc in &locations {
            for (i, &v) in loc.iter().enumerate() {
                if v < bounds[i].0 {
                    bounds[i].0 = v;
                }
                if v > bounds[i].1 {
                    bounds[i].1 = v;
                }
            }
        }

        Ok(Self { base, supports, deltas, bounds })
    }

    fn evaluate(&self, location: &[f64], extrapolate: bool) -> V {
        let mut result = self.base.clone();
        for (support, delta) in self.supports.iter().zip(&self.deltas) {
            let scalar = support.scalar_at(location, extrapolate);
            if scalar != 0.0 {
                result = result + delta.clone() * scalar;
            }
        }
        result
    }
}

/// A fitted variation model for one set of samples, immutable once
/// built. Produces instances for arbitrary locations; replaced
/// wholesale on rebuild, never mutated in place.
#[derive(Debug, Clone)]
pub struct Instancer<V> {
    kind: ModelKind,
    axes: Axes,
    /// Normalized continuous coordinate of the bias location; sample
    /// and query locations are shifted so the bias is the origin.
    origin: Vec<f64>,
    subspaces: BTreeMap<SubspaceKey, Submodel<V>>,
}

impl<V: Interpolable> Instancer<V> {
    /// Fit a model over `(location, value)` master samples.
    ///
    /// Samples are grouped by their discrete-axis coordinates; each
    /// group is fitted independently and queries never interpolate
    /// across discrete sub-spaces. The `bias` location anchors the
    /// zero-delta base master, normally the space's default location;
    /// each populated sub-space must contain a sample at the bias's
    /// continuous coordinate.
    pub fn build(
        kind: ModelKind,
        axes: &Axes,
        samples: Vec<(Location, V)>,
        bias: &Location,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(ModelError::NoMasters);
        }
        let (bias_continuous, _) = axes.split(bias);
        let origin = axes.normalize_continuous(&bias_continuous)?;

        let mut groups: BTreeMap<SubspaceKey, (Location, Vec<(Vec<f64>, V)>)> = BTreeMap::new();
        for (location, value) in samples {
            let (continuous, discrete) = axes.split(&location);
            let key = subspace_key(axes, &discrete)?;
            let mut normalized = axes.normalize_continuous(&continuous)?;
            for (v, o) in normalized.iter_mut().zip(&origin) {
                *v -= o;
            }
            groups.entry(key).or_insert_with(|| (discrete, Vec::new())).1.push((normalized, value));
        }

        let mut subspaces = BTreeMap::new();
        for (key, (discrete, group)) in groups {
            debug!("fitting {kind:?} sub-space [{discrete}] with {} masters", group.len());
            let label = discrete.to_string();
            subspaces.insert(key, Submodel::build(kind, group, &label)?);
        }

        Ok(Self { kind, axes: axes.clone(), origin, subspaces })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Evaluate the model at a location.
    ///
    /// With `bend = true`, each continuous axis is clamped
    /// independently to the span of master peaks in the queried
    /// sub-space before evaluation, so out-of-box queries fold back to
    /// the box edge. With `bend = false` the model extrapolates
    /// linearly. Deterministic: the same (location, bend) always
    /// yields the same value for an unchanged instancer.
    pub fn make_instance(&self, location: &Location, bend: bool) -> Result<V> {
        let (continuous, discrete) = self.axes.split(location);
        let key = subspace_key(&self.axes, &discrete)?;
        let sub = self
            .subspaces
            .get(&key)
            .ok_or_else(|| ModelError::EmptySubspace(discrete.to_string()))?;

        let mut normalized = self.axes.normalize_continuous(&continuous)?;
        for (v, o) in normalized.iter_mut().zip(&self.origin) {
            *v -= o;
        }
        if bend {
            for (v, &(lo, hi)) in normalized.iter_mut().zip(&sub.bounds) {
                *v = v.clamp(lo, hi);
            }
        }
        Ok(sub.evaluate(&normalized, !bend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{Axis, ContinuousAxis, DiscreteAxis};

    fn two_axis_space() -> Axes {
        Axes::new(vec![
            Axis::Continuous(ContinuousAxis::new("wght", 100.0, 400.0, 900.0)),
            Axis::Continuous(ContinuousAxis::new("wdth", 100.0, 100.0, 200.0)),
        ])
        .unwrap()
    }

    fn loc(wght: f64, wdth: f64) -> Location {
        Location::from_pairs([("wght", wght), ("wdth", wdth)])
    }

    fn three_master_instancer(kind: ModelKind) -> Instancer<f64> {
        let _ = env_logger::builder().is_test(true).try_init();
        let axes = two_axis_space();
        let samples = vec![
            (loc(400.0, 100.0), 500.0),
            (loc(900.0, 100.0), 900.0),
            (loc(400.0, 200.0), 620.0),
        ];
        Instancer::build(kind, &axes, samples, &axes.default_location()).unwrap()
    }

    #[test]
    fn region_scalar_at_peak() {
        let region = Region::from_peak_with_neighbors(&[1.0, 0.0], &[vec![1.0, 0.0]]);
        assert_eq!(region.scalar_at(&[1.0, 0.0], false), 1.0);
    }

    #[test]
    fn region_scalar_interpolated() {
        let region = Region::from_peak_with_neighbors(&[1.0, 0.0], &[vec![1.0, 0.0]]);
        assert!((region.scalar_at(&[0.5, 0.0], false) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn region_scalar_outside_support() {
        let region = Region::from_peak_with_neighbors(&[1.0, 0.0], &[vec![1.0, 0.0]]);
        assert_eq!(region.scalar_at(&[-0.5, 0.0], false), 0.0);
    }

    #[test]
    fn region_scalar_extrapolates_edge_slope() {
        let region = Region::from_peak_with_neighbors(&[1.0], &[vec![1.0]]);
        assert!((region.scalar_at(&[2.0], true) - 2.0).abs() < 1e-9);
        assert!((region.scalar_at(&[-0.5], true) - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn region_intermediate_master_gets_neighbor_boundary() {
        let all = vec![vec![0.5], vec![1.0]];
        let outer = Region::from_peak_with_neighbors(&[1.0], &all);
        assert_eq!(outer.axes[0], (0.5, 1.0, 1.0));
        // The outer region must not leak into the intermediate peak,
        // even when extrapolation is on.
        assert_eq!(outer.scalar_at(&[0.5], false), 0.0);
        assert_eq!(outer.scalar_at(&[0.3], true), 0.0);
    }

    #[test]
    fn tents_stay_zero_across_a_populated_origin() {
        let all = vec![vec![-1.0], vec![1.0]];
        let positive = Region::from_peak_with_neighbors(&[1.0], &all);
        assert_eq!(positive.scalar_at(&[-1.0], true), 0.0);
        assert_eq!(positive.scalar_at(&[-0.25], true), 0.0);
        let negative = Region::from_peak_with_neighbors(&[-1.0], &all);
        assert_eq!(negative.scalar_at(&[0.5], true), 0.0);
        assert_eq!(negative.scalar_at(&[1.5], true), 0.0);
    }

    #[test]
    fn masters_on_both_sides_of_default_reproduce() {
        let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
            "wght", 100.0, 400.0, 900.0,
        ))])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 100.0)]), 300.0),
            (Location::from_pairs([("wght", 400.0)]), 500.0),
            (Location::from_pairs([("wght", 900.0)]), 900.0),
        ];
        let instancer =
            Instancer::build(ModelKind::Variable, &axes, samples, &axes.default_location())
                .unwrap();
        let at = |w: f64| {
            instancer.make_instance(&Location::from_pairs([("wght", w)]), false).unwrap()
        };

        assert!((at(100.0) - 300.0).abs() < 1e-6);
        assert!((at(400.0) - 500.0).abs() < 1e-6);
        assert!((at(900.0) - 900.0).abs() < 1e-6);
        // Piecewise-linear on each side of the default.
        assert!((at(250.0) - 400.0).abs() < 1e-6);
        assert!((at(650.0) - 700.0).abs() < 1e-6);
        // Extrapolation continues the negative-side segment only.
        assert!((at(25.0) - 250.0).abs() < 1e-6);
    }

    #[test]
    fn bias_off_default_anchors_the_base_master() {
        let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
            "wght", 100.0, 400.0, 900.0,
        ))])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 100.0)]), 300.0),
            (Location::from_pairs([("wght", 400.0)]), 500.0),
            (Location::from_pairs([("wght", 900.0)]), 900.0),
        ];
        let bias = Location::from_pairs([("wght", 900.0)]);
        let instancer = Instancer::build(ModelKind::Variable, &axes, samples, &bias).unwrap();
        let at = |w: f64, bend: bool| {
            instancer.make_instance(&Location::from_pairs([("wght", w)]), bend).unwrap()
        };

        assert!((at(100.0, false) - 300.0).abs() < 1e-6);
        assert!((at(400.0, false) - 500.0).abs() < 1e-6);
        assert!((at(900.0, false) - 900.0).abs() < 1e-6);
        // Interpolation between the two lighter masters still works
        // even though their shifted peaks sit outside [-1, 1].
        assert!((at(250.0, true) - 400.0).abs() < 1e-6);
        assert!((at(650.0, false) - 700.0).abs() < 1e-6);
    }

    #[test]
    fn extrapolation_continues_outermost_segment() {
        let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
            "wght", 100.0, 100.0, 900.0,
        ))])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 100.0)]), 80.0),
            (Location::from_pairs([("wght", 500.0)]), 300.0),
            (Location::from_pairs([("wght", 900.0)]), 400.0),
        ];
        let instancer = Instancer::build(
            ModelKind::Variable,
            &axes,
            samples,
            &axes.default_location(),
        )
        .unwrap();

        // Past the last master: slope of the 500..900 segment.
        let past = instancer
            .make_instance(&Location::from_pairs([("wght", 1060.0)]), false)
            .unwrap();
        assert!((past - 440.0).abs() < 1e-6);
    }

    #[test]
    fn masters_reproduce_exactly() {
        let instancer = three_master_instancer(ModelKind::Variable);
        assert!((instancer.make_instance(&loc(400.0, 100.0), false).unwrap() - 500.0).abs() < 1e-6);
        assert!((instancer.make_instance(&loc(900.0, 100.0), false).unwrap() - 900.0).abs() < 1e-6);
        assert!((instancer.make_instance(&loc(400.0, 200.0), false).unwrap() - 620.0).abs() < 1e-6);
    }

    #[test]
    fn intermediate_master_reproduces_exactly() {
        let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
            "wght", 100.0, 100.0, 900.0,
        ))])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 100.0)]), 80.0),
            (Location::from_pairs([("wght", 500.0)]), 300.0),
            (Location::from_pairs([("wght", 900.0)]), 400.0),
        ];
        let instancer = Instancer::build(
            ModelKind::Variable,
            &axes,
            samples,
            &axes.default_location(),
        )
        .unwrap();

        let at = |w: f64| {
            instancer
                .make_instance(&Location::from_pairs([("wght", w)]), false)
                .unwrap()
        };
        assert!((at(500.0) - 300.0).abs() < 1e-6);
        assert!((at(900.0) - 400.0).abs() < 1e-6);
        // Piecewise-linear between the intermediate and outer master.
        assert!((at(700.0) - 350.0).abs() < 1e-6);
    }

    #[test]
    fn interpolates_along_each_axis() {
        let instancer = three_master_instancer(ModelKind::Variable);
        // (650 - 400) / (900 - 400) = 0.5 of the way from M1 to M2.
        let w = instancer.make_instance(&loc(650.0, 100.0), false).unwrap();
        assert!((w - 700.0).abs() < 1e-6);
        // (150 - 100) / (200 - 100) = 0.5 of the way from M1 to M3.
        let w = instancer.make_instance(&loc(400.0, 150.0), false).unwrap();
        assert!((w - 560.0).abs() < 1e-6);
    }

    #[test]
    fn instances_are_deterministic() {
        let instancer = three_master_instancer(ModelKind::Variable);
        let a = instancer.make_instance(&loc(523.0, 137.0), true).unwrap();
        let b = instancer.make_instance(&loc(523.0, 137.0), true).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn bend_clamps_out_of_box_queries() {
        let instancer = three_master_instancer(ModelKind::Variable);
        let bent = instancer.make_instance(&loc(1400.0, 100.0), true).unwrap();
        assert!((500.0..=900.0).contains(&bent));
        assert!((bent - 900.0).abs() < 1e-6);

        let extrapolated = instancer.make_instance(&loc(1400.0, 100.0), false).unwrap();
        assert!(extrapolated > 900.0);
    }

    #[test]
    fn mutator_kind_interpolates_and_extrapolates() {
        let instancer = three_master_instancer(ModelKind::Mutator);
        assert!((instancer.make_instance(&loc(650.0, 100.0), false).unwrap() - 700.0).abs() < 1e-6);
        assert!((instancer.make_instance(&loc(900.0, 100.0), false).unwrap() - 900.0).abs() < 1e-6);
        let bent = instancer.make_instance(&loc(1400.0, 150.0), true).unwrap();
        assert!((bent - (900.0 + 60.0)).abs() < 1e-6);
    }

    #[test]
    fn discrete_axis_partitions_subspaces() {
        let axes = Axes::new(vec![
            Axis::Continuous(ContinuousAxis::new("wght", 100.0, 400.0, 900.0)),
            Axis::Discrete(DiscreteAxis::new("ital", 0.0, vec![0.0, 1.0])),
        ])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 400.0), ("ital", 0.0)]), 500.0),
            (Location::from_pairs([("wght", 900.0), ("ital", 0.0)]), 900.0),
            (Location::from_pairs([("wght", 400.0), ("ital", 1.0)]), 540.0),
        ];
        let instancer =
            Instancer::build(ModelKind::Variable, &axes, samples, &axes.default_location())
                .unwrap();

        // The italic sub-space has a single master; no upright bleed.
        let italic = instancer
            .make_instance(&Location::from_pairs([("wght", 400.0), ("ital", 1.0)]), false)
            .unwrap();
        assert!((italic - 540.0).abs() < 1e-6);

        // A value outside the enumerated set is rejected.
        let err = instancer
            .make_instance(&Location::from_pairs([("wght", 400.0), ("ital", 0.5)]), false)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidDiscreteValue { .. }));
    }

    #[test]
    fn missing_base_master_is_an_error() {
        let axes = two_axis_space();
        let samples = vec![(loc(900.0, 100.0), 900.0), (loc(400.0, 200.0), 620.0)];
        let err = Instancer::build(ModelKind::Variable, &axes, samples, &axes.default_location())
            .unwrap_err();
        assert!(matches!(err, ModelError::NoBaseMaster(_)));
    }

    #[test]
    fn degenerate_axis_surfaces_on_build() {
        let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
            "wght", 400.0, 400.0, 400.0,
        ))])
        .unwrap();
        let samples = vec![
            (Location::from_pairs([("wght", 400.0)]), 500.0),
            (Location::from_pairs([("wght", 500.0)]), 900.0),
        ];
        let err = Instancer::build(ModelKind::Variable, &axes, samples, &axes.default_location())
            .unwrap_err();
        assert_eq!(err, ModelError::DegenerateAxis("wght".to_string()));
    }
}
