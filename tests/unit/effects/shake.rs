use super::*;
use crate::surface::monospace::MonospaceSurface;

fn laid_out(text: &str) -> MonospaceSurface {
    let mut s = MonospaceSurface::default();
    s.set_text(text);
    s.force_layout();
    s
}

#[test]
fn offsets_visible_glyphs_only() {
    let mut s = laid_out("a b");
    let before = s.glyphs().to_vec();
    ShakeModifier {
        amplitude: 3.0,
        frequency: 12.0,
    }
    .apply(&mut s, 0, 2, 0.0);

    assert_ne!(s.glyphs()[0].quad, before[0].quad);
    assert_eq!(s.glyphs()[1].quad, before[1].quad);
    assert_ne!(s.glyphs()[2].quad, before[2].quad);
}

#[test]
fn out_of_range_span_is_clamped() {
    let mut s = laid_out("ab");
    let before = s.glyphs().to_vec();
    ShakeModifier::default().apply(&mut s, 1, 50, 0.25);
    assert_eq!(s.glyphs()[0].quad, before[0].quad);
    assert_ne!(s.glyphs()[1].quad, before[1].quad);
}

#[test]
fn same_time_gives_same_geometry() {
    let mut a = laid_out("shake");
    let mut b = laid_out("shake");
    let m = ShakeModifier::default();
    m.apply(&mut a, 0, 4, 1.25);
    m.apply(&mut b, 0, 4, 1.25);
    assert_eq!(a.glyphs(), b.glyphs());
}

#[test]
fn empty_surface_is_a_noop() {
    let mut s = MonospaceSurface::default();
    ShakeModifier::default().apply(&mut s, 0, 10, 0.0);
    assert!(s.glyphs().is_empty());
}

#[test]
fn span_starting_past_the_end_is_a_noop() {
    let mut s = laid_out("ab");
    let before = s.glyphs().to_vec();
    ShakeModifier::default().apply(&mut s, 5, 9, 0.25);
    assert_eq!(s.glyphs(), &before[..]);
}
