//! UFO-backed font source and the conversions between norad glyphs and
//! math glyphs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kurbo::Affine;
use log::{debug, warn};
use varspace_glyph_math::{MathComponent, MathContour, MathGlyph, MathPoint, PointKind};

use crate::error::{Error, Result};
use crate::provider::FontSource;

/// A master backed by a UFO on disk, optionally pinned to a
/// non-default layer.
///
/// Identity is the (path, layer) pair: the same file can back several
/// sources at different layers, and several descriptors may reference
/// one file.
#[derive(Debug)]
pub struct UfoSource {
    path: PathBuf,
    layer: Option<String>,
    font: norad::Font,
}

impl UfoSource {
    /// Load a UFO headlessly from disk. Fails if the file cannot be
    /// read or the requested layer does not exist.
    pub fn load(path: &Path, layer: Option<&str>) -> Result<Self> {
        let font = norad::Font::load(path).map_err(|err| Error::LoadSource {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if let Some(name) = layer {
            if font.layers.get(name).is_none() {
                return Err(Error::MissingLayer {
                    path: path.to_path_buf(),
                    layer: name.to_string(),
                });
            }
        }
        debug!("loaded UFO {}", path.display());
        Ok(Self { path: path.to_path_buf(), layer: layer.map(str::to_string), font })
    }

    /// Wrap an already-open font, e.g. one the host editor holds.
    pub fn from_font(path: &Path, font: norad::Font) -> Self {
        Self { path: path.to_path_buf(), layer: None, font }
    }

    pub fn layer_name(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    fn layer(&self) -> &norad::Layer {
        match &self.layer {
            Some(name) => {
                self.font.layers.get(name).unwrap_or_else(|| self.font.default_layer())
            }
            None => self.font.default_layer(),
        }
    }
}

impl FontSource for UfoSource {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn units_per_em(&self) -> f64 {
        self.font.font_info.units_per_em.map(|upm| upm.as_f64()).unwrap_or(1000.0)
    }

    fn glyph_names(&self) -> Vec<String> {
        self.layer().iter().map(|glyph| glyph.name().to_string()).collect()
    }

    fn has_glyph(&self, name: &str) -> bool {
        self.layer().get_glyph(name).is_some()
    }

    fn math_glyph(&self, name: &str) -> Option<MathGlyph> {
        self.layer().get_glyph(name).map(from_norad_glyph)
    }

    fn component_refs(&self, name: &str) -> Vec<String> {
        self.layer()
            .get_glyph(name)
            .map(|glyph| glyph.components.iter().map(|c| c.base.to_string()).collect())
            .unwrap_or_default()
    }

    fn codepoint_map(&self) -> BTreeMap<char, String> {
        let mut map = BTreeMap::new();
        for glyph in self.layer().iter() {
            for codepoint in glyph.codepoints.iter() {
                map.entry(codepoint).or_insert_with(|| glyph.name().to_string());
            }
        }
        map
    }

    fn kerning(&self) -> BTreeMap<(String, String), f64> {
        let mut flat = BTreeMap::new();
        for (left, rights) in self.font.kerning.iter() {
            for (right, value) in rights {
                flat.insert((left.to_string(), right.to_string()), *value);
            }
        }
        flat
    }
}

/// Extract one norad glyph's interpolatable geometry.
pub fn from_norad_glyph(glyph: &norad::Glyph) -> MathGlyph {
    let contours = glyph
        .contours
        .iter()
        .map(|contour| {
            let points = contour
                .points
                .iter()
                .map(|point| MathPoint {
                    x: point.x,
                    y: point.y,
                    kind: point_kind(&point.typ),
                    smooth: point.smooth,
                })
                .collect();
            MathContour::new(points)
        })
        .collect();
    let components = glyph
        .components
        .iter()
        .map(|component| {
            MathComponent::new(
                component.base.to_string(),
                affine_from_transform(&component.transform),
            )
        })
        .collect();
    MathGlyph::new(contours, components, glyph.width)
}

/// Build a norad glyph back from interpolated geometry, for hosts that
/// write instances into a UFO. Components with an invalid base name
/// are dropped with a warning.
pub fn to_norad_glyph(name: &str, glyph: &MathGlyph) -> norad::Glyph {
    let mut out = norad::Glyph::new(name);
    out.width = glyph.width;
    out.contours = glyph
        .contours
        .iter()
        .map(|contour| {
            let points = contour
                .points
                .iter()
                .map(|point| {
                    norad::ContourPoint::new(
                        point.x,
                        point.y,
                        norad_point_type(point.kind),
                        point.smooth,
                        None,
                        None,
                    )
                })
                .collect();
            norad::Contour::new(points, None)
        })
        .collect();
    for component in &glyph.components {
        match component.base.parse::<norad::Name>() {
            Ok(base) => out.components.push(norad::Component::new(
                base,
                transform_from_affine(component.transform),
                None,
            )),
            Err(_) => warn!("dropping component with invalid base name '{}'", component.base),
        }
    }
    out
}

fn point_kind(typ: &norad::PointType) -> PointKind {
    match typ {
        norad::PointType::Move => PointKind::Move,
        norad::PointType::Line => PointKind::Line,
        norad::PointType::OffCurve => PointKind::OffCurve,
        norad::PointType::Curve => PointKind::Curve,
        norad::PointType::QCurve => PointKind::QCurve,
    }
}

fn norad_point_type(kind: PointKind) -> norad::PointType {
    match kind {
        PointKind::Move => norad::PointType::Move,
        PointKind::Line => norad::PointType::Line,
        PointKind::OffCurve => norad::PointType::OffCurve,
        PointKind::Curve => norad::PointType::Curve,
        PointKind::QCurve => norad::PointType::QCurve,
    }
}

fn affine_from_transform(transform: &norad::AffineTransform) -> Affine {
    Affine::new([
        transform.x_scale,
        transform.xy_scale,
        transform.yx_scale,
        transform.y_scale,
        transform.x_offset,
        transform.y_offset,
    ])
}

fn transform_from_affine(affine: Affine) -> norad::AffineTransform {
    let [x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset] = affine.as_coeffs();
    norad::AffineTransform { x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_norad_glyph() -> norad::Glyph {
        let mut glyph = norad::Glyph::new("A");
        glyph.width = 520.0;
        let points = vec![
            norad::ContourPoint::new(0.0, 0.0, norad::PointType::Line, false, None, None),
            norad::ContourPoint::new(100.0, 0.0, norad::PointType::Line, false, None, None),
            norad::ContourPoint::new(50.0, 80.0, norad::PointType::Line, true, None, None),
        ];
        glyph.contours.push(norad::Contour::new(points, None));
        glyph.components.push(norad::Component::new(
            "acute".parse().unwrap(),
            norad::AffineTransform {
                x_scale: 1.0,
                xy_scale: 0.0,
                yx_scale: 0.0,
                y_scale: 1.0,
                x_offset: 30.0,
                y_offset: 120.0,
            },
            None,
        ));
        glyph
    }

    #[test]
    fn norad_glyph_converts_both_ways() {
        let original = sample_norad_glyph();
        let math = from_norad_glyph(&original);

        assert_eq!(math.contours.len(), 1);
        assert_eq!(math.contours[0].points.len(), 3);
        assert!(math.contours[0].points[2].smooth);
        assert_eq!(math.components[0].base, "acute");
        let coeffs = math.components[0].transform.as_coeffs();
        assert!((coeffs[4] - 30.0).abs() < 1e-9);
        assert!((math.width - 520.0).abs() < 1e-9);

        let back = to_norad_glyph("A", &math);
        assert_eq!(back.contours.len(), 1);
        assert_eq!(back.contours[0].points.len(), 3);
        assert_eq!(back.components.len(), 1);
        assert!((back.components[0].transform.y_offset - 120.0).abs() < 1e-9);
        assert!((back.width - 520.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_component_base_is_dropped() {
        let mut math = from_norad_glyph(&sample_norad_glyph());
        math.components[0].base = String::new();

        let back = to_norad_glyph("A", &math);
        assert!(back.components.is_empty());
    }
}
