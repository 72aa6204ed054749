//! Disk round-trip: build master UFOs with norad, load them through
//! the default loader and interpolate.

use varspace_engine::{
    Axes, Axis, ContinuousAxis, DesignSpaceSession, Error, FontSource, Location,
    SourceDescriptor, UfoSource,
};

fn master_font(size: f64, width: f64, kern: f64) -> norad::Font {
    let mut font = norad::Font::new();

    let mut glyph = norad::Glyph::new("A");
    glyph.width = width;
    let points = vec![
        norad::ContourPoint::new(0.0, 0.0, norad::PointType::Line, false, None, None),
        norad::ContourPoint::new(size, 0.0, norad::PointType::Line, false, None, None),
        norad::ContourPoint::new(size, size, norad::PointType::Line, false, None, None),
        norad::ContourPoint::new(0.0, size, norad::PointType::Line, false, None, None),
    ];
    glyph.contours.push(norad::Contour::new(points, None));
    font.default_layer_mut().insert_glyph(glyph);

    font.kerning
        .entry("A".parse().unwrap())
        .or_default()
        .insert("V".parse().unwrap(), kern);
    font
}

#[test]
fn interpolates_between_ufos_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let light = dir.path().join("Light.ufo");
    let bold = dir.path().join("Bold.ufo");
    master_font(100.0, 500.0, -80.0).save(&light).unwrap();
    master_font(200.0, 900.0, -120.0).save(&bold).unwrap();

    let axes = Axes::new(vec![Axis::Continuous(ContinuousAxis::new(
        "wght", 400.0, 400.0, 900.0,
    ))])
    .unwrap();
    let sources = vec![
        SourceDescriptor::new("Light", Location::from_pairs([("wght", 400.0)]), &light),
        SourceDescriptor::new("Bold", Location::from_pairs([("wght", 900.0)]), &bold),
    ];

    let mut session = DesignSpaceSession::new(axes, sources);
    session.load_sources(false);
    assert!(session.registry().problems().is_empty(), "{:?}", session.registry().problems());

    let location = Location::from_pairs([("wght", 650.0)]);
    let instance = session.glyph_instance("A", &location, false, false).unwrap().unwrap();
    assert!((instance.width - 700.0).abs() < 1e-6);
    assert!((instance.contours[0].points[2].x - 150.0).abs() < 1e-6);
    assert!((instance.contours[0].points[2].y - 150.0).abs() < 1e-6);

    let kerning = session.kerning_instance(&location, false).unwrap();
    assert!((kerning.get("A", "V") + 100.0).abs() < 1e-6);
}

#[test]
fn units_per_em_reads_exactly_with_a_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Upm.ufo");

    let mut font = master_font(100.0, 500.0, -80.0);
    font.font_info.units_per_em = norad::fontinfo::NonNegativeIntegerOrFloat::new(2048.0);
    font.save(&path).unwrap();

    let source = UfoSource::load(&path, None).unwrap();
    assert_eq!(source.units_per_em(), 2048.0);

    // Fonts that never declare a UPM fall back to 1000.
    let bare = dir.path().join("Bare.ufo");
    master_font(100.0, 500.0, -80.0).save(&bare).unwrap();
    assert_eq!(UfoSource::load(&bare, None).unwrap().units_per_em(), 1000.0);
}

#[test]
fn missing_layer_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Light.ufo");
    master_font(100.0, 500.0, -80.0).save(&path).unwrap();

    let err = UfoSource::load(&path, Some("sketches")).unwrap_err();
    assert!(matches!(err, Error::MissingLayer { layer, .. } if layer == "sketches"));
}

#[test]
fn unreadable_file_is_a_load_error() {
    let err = UfoSource::load(std::path::Path::new("/nonexistent/Nope.ufo"), None).unwrap_err();
    assert!(matches!(err, Error::LoadSource { .. }));
}
