//! # Glyph Math
//!
//! Value type for one glyph's interpolatable geometry: contour points,
//! component references and the advance width.
//!
//! `MathGlyph` supports addition, subtraction and scalar multiplication,
//! which is all a variation model needs to turn a set of masters into
//! deltas and back into instances. Arithmetic is only defined between
//! structurally compatible glyphs (same contour, point and component
//! topology); use [`MathGlyph::check_compatible`] before mixing masters.

use std::ops::{Add, Mul, Sub};

use kurbo::{Affine, Point};

/// Segment role of a contour point, preserving the quadratic/cubic
/// structure of the source outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

/// One point of a contour.
///
/// Only `x` and `y` take part in interpolation; `kind` and `smooth`
/// must agree across masters and are carried over from the left
/// operand of any arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct MathPoint {
    pub x: f64,
    pub y: f64,
    pub kind: PointKind,
    pub smooth: bool,
}

impl MathPoint {
    pub fn new(x: f64, y: f64, kind: PointKind) -> Self {
        Self { x, y, kind, smooth: false }
    }

    pub fn on_curve(&self) -> bool {
        self.kind != PointKind::OffCurve
    }
}

/// An ordered closed or open sequence of points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MathContour {
    pub points: Vec<MathPoint>,
}

impl MathContour {
    pub fn new(points: Vec<MathPoint>) -> Self {
        Self { points }
    }
}

/// A reference to another glyph placed under an affine transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MathComponent {
    /// Name of the base glyph.
    pub base: String,
    pub transform: Affine,
}

impl MathComponent {
    pub fn new(base: impl Into<String>, transform: Affine) -> Self {
        Self { base: base.into(), transform }
    }
}

/// Why two glyphs cannot be interpolated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Mismatch {
    #[error("contour count differs: {0} vs {1}")]
    ContourCount(usize, usize),

    #[error("contour {contour}: point count differs: {a} vs {b}")]
    PointCount { contour: usize, a: usize, b: usize },

    #[error("contour {contour}, point {point}: segment type differs")]
    PointKind { contour: usize, point: usize },

    #[error("component count differs: {0} vs {1}")]
    ComponentCount(usize, usize),

    #[error("component {component}: base glyph differs: '{a}' vs '{b}'")]
    ComponentBase { component: usize, a: String, b: String },
}

/// One glyph's interpolatable geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MathGlyph {
    pub contours: Vec<MathContour>,
    pub components: Vec<MathComponent>,
    pub width: f64,
}

impl MathGlyph {
    pub fn new(contours: Vec<MathContour>, components: Vec<MathComponent>, width: f64) -> Self {
        Self { contours, components, width }
    }

    /// A glyph with no outline and no components (spacing glyphs).
    pub fn empty(width: f64) -> Self {
        Self { contours: Vec::new(), components: Vec::new(), width }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty() && self.components.is_empty()
    }

    /// Names of the glyphs referenced as components, in order.
    pub fn component_bases(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.base.as_str())
    }

    /// Verify that `self` and `other` share the same topology and can
    /// therefore be used as operands of `+`, `-` and as masters of one
    /// variation model. Reports the first mismatch found.
    pub fn check_compatible(&self, other: &MathGlyph) -> Result<(), Mismatch> {
        if self.contours.len() != other.contours.len() {
            return Err(Mismatch::ContourCount(self.contours.len(), other.contours.len()));
        }
        for (i, (a, b)) in self.contours.iter().zip(&other.contours).enumerate() {
            if a.points.len() != b.points.len() {
                return Err(Mismatch::PointCount {
                    contour: i,
                    a: a.points.len(),
                    b: b.points.len(),
                });
            }
            for (j, (pa, pb)) in a.points.iter().zip(&b.points).enumerate() {
                if pa.kind != pb.kind {
                    return Err(Mismatch::PointKind { contour: i, point: j });
                }
            }
        }
        if self.components.len() != other.components.len() {
            return Err(Mismatch::ComponentCount(self.components.len(), other.components.len()));
        }
        for (i, (a, b)) in self.components.iter().zip(&other.components).enumerate() {
            if a.base != b.base {
                return Err(Mismatch::ComponentBase {
                    component: i,
                    a: a.base.clone(),
                    b: b.base.clone(),
                });
            }
        }
        Ok(())
    }

    /// Component-wise comparison within `tolerance`, for checking that
    /// an instance reproduces a master.
    pub fn approx_eq(&self, other: &MathGlyph, tolerance: f64) -> bool {
        if self.check_compatible(other).is_err() {
            return false;
        }
        if (self.width - other.width).abs() > tolerance {
            return false;
        }
        for (a, b) in self.contours.iter().zip(&other.contours) {
            for (pa, pb) in a.points.iter().zip(&b.points) {
                if (pa.x - pb.x).abs() > tolerance || (pa.y - pb.y).abs() > tolerance {
                    return false;
                }
            }
        }
        for (a, b) in self.components.iter().zip(&other.components) {
            let ca = a.transform.as_coeffs();
            let cb = b.transform.as_coeffs();
            for (va, vb) in ca.iter().zip(&cb) {
                if (va - vb).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Return this glyph with every point mapped through `transform`
    /// and component transforms composed with it. The width is left
    /// unchanged; callers flattening components decide the metrics.
    pub fn transformed(&self, transform: Affine) -> MathGlyph {
        let contours = self
            .contours
            .iter()
            .map(|contour| {
                let points = contour
                    .points
                    .iter()
                    .map(|p| {
                        let mapped = transform * Point::new(p.x, p.y);
                        MathPoint { x: mapped.x, y: mapped.y, kind: p.kind, smooth: p.smooth }
                    })
                    .collect();
                MathContour { points }
            })
            .collect();
        let components = self
            .components
            .iter()
            .map(|c| MathComponent { base: c.base.clone(), transform: transform * c.transform })
            .collect();
        MathGlyph { contours, components, width: self.width }
    }

    /// Combine two compatible glyphs coordinate-wise.
    ///
    /// Panics if the operands were never compatibility-checked; that is
    /// a programmer error, not a domain failure.
    fn zip_with(&self, other: &MathGlyph, f: impl Fn(f64, f64) -> f64) -> MathGlyph {
        assert_eq!(
            self.contours.len(),
            other.contours.len(),
            "glyph operands must be compatibility-checked"
        );
        assert_eq!(
            self.components.len(),
            other.components.len(),
            "glyph operands must be compatibility-checked"
        );
        let contours = self
            .contours
            .iter()
            .zip(&other.contours)
            .map(|(a, b)| {
                assert_eq!(
                    a.points.len(),
                    b.points.len(),
                    "glyph operands must be compatibility-checked"
                );
                let points = a
                    .points
                    .iter()
                    .zip(&b.points)
                    .map(|(pa, pb)| MathPoint {
                        x: f(pa.x, pb.x),
                        y: f(pa.y, pb.y),
                        kind: pa.kind,
                        smooth: pa.smooth,
                    })
                    .collect();
                MathContour { points }
            })
            .collect();
        let components = self
            .components
            .iter()
            .zip(&other.components)
            .map(|(a, b)| {
                let ca = a.transform.as_coeffs();
                let cb = b.transform.as_coeffs();
                let mut coeffs = [0.0f64; 6];
                for (i, c) in coeffs.iter_mut().enumerate() {
                    *c = f(ca[i], cb[i]);
                }
                MathComponent { base: a.base.clone(), transform: Affine::new(coeffs) }
            })
            .collect();
        MathGlyph { contours, components, width: f(self.width, other.width) }
    }
}

impl Add for MathGlyph {
    type Output = MathGlyph;

    fn add(self, rhs: MathGlyph) -> MathGlyph {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for MathGlyph {
    type Output = MathGlyph;

    fn sub(self, rhs: MathGlyph) -> MathGlyph {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Mul<f64> for MathGlyph {
    type Output = MathGlyph;

    fn mul(self, scalar: f64) -> MathGlyph {
        let contours = self
            .contours
            .into_iter()
            .map(|contour| {
                let points = contour
                    .points
                    .into_iter()
                    .map(|p| MathPoint { x: p.x * scalar, y: p.y * scalar, ..p })
                    .collect();
                MathContour { points }
            })
            .collect();
        let components = self
            .components
            .into_iter()
            .map(|c| {
                let coeffs = c.transform.as_coeffs().map(|v| v * scalar);
                MathComponent { base: c.base, transform: Affine::new(coeffs) }
            })
            .collect();
        MathGlyph { contours, components, width: self.width * scalar }
    }
}
