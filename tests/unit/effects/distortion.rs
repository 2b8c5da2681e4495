use super::*;
use crate::surface::monospace::MonospaceSurface;

fn laid_out(text: &str) -> MonospaceSurface {
    let mut s = MonospaceSurface::default();
    s.set_text(text);
    s.force_layout();
    s
}

#[test]
fn every_mode_moves_vertices() {
    for mode in [
        DistortionKind::Crush,
        DistortionKind::Melt,
        DistortionKind::Shatter,
        DistortionKind::Stretch,
    ] {
        let mut s = laid_out("Warp");
        let before = s.glyphs().to_vec();
        DistortionModifier {
            mode,
            amplitude: 3.0,
            frequency: 6.0,
        }
        .apply(&mut s, 0, 3, 0.0);
        assert_ne!(s.glyphs(), &before[..], "{mode:?} left glyphs untouched");
    }
}

#[test]
fn melt_keeps_baseline_and_lowers_top() {
    let mut s = laid_out("m");
    DistortionModifier::new(DistortionKind::Melt).apply(&mut s, 0, 0, 0.0);
    let q = s.glyphs()[0].quad;
    assert_eq!(q[0].y, 0.0);
    assert!(q[1].y < 16.0);
}

#[test]
fn crush_keeps_center() {
    let mut s = laid_out("c");
    let center = s.glyphs()[0].center();
    DistortionModifier::new(DistortionKind::Crush).apply(&mut s, 0, 0, 0.3);
    let after = s.glyphs()[0].center();
    assert!((after - center).hypot() < 1e-9);
}

#[test]
fn kind_serializes_snake_case() {
    let s = serde_json::to_string(&DistortionKind::Shatter).unwrap();
    assert_eq!(s, "\"shatter\"");
    let m: DistortionModifier = serde_json::from_str(r#"{ "mode": "melt" }"#).unwrap();
    assert_eq!(m.mode, DistortionKind::Melt);
    assert_eq!(m.amplitude, 4.0);
}

#[test]
fn names_identify_mode() {
    assert_eq!(
        DistortionModifier::new(DistortionKind::Stretch).name(),
        "distortion.stretch"
    );
}
