use super::*;

#[test]
fn rich_text_strips_markup_from_layout() {
    let mut s = MonospaceSurface::default();
    s.set_rich_text(true);
    s.set_text("<color=red>赤</color>青");
    s.force_layout();
    assert_eq!(s.character_count(), 2);
    assert_eq!(s.laid_out_text(), "赤青");
}

#[test]
fn plain_text_keeps_markup_as_content() {
    let mut s = MonospaceSurface::default();
    s.set_rich_text(false);
    s.set_text("<b>x</b>");
    s.force_layout();
    assert_eq!(s.character_count(), 8);
}

#[test]
fn revealed_text_honors_max_visible() {
    let mut s = MonospaceSurface::default();
    s.set_text("hello");
    s.force_layout();
    s.set_max_visible_characters(2);
    assert_eq!(s.revealed_text(), "he");
    s.set_max_visible_characters(0);
    assert_eq!(s.revealed_text(), "");
}

#[test]
fn newline_breaks_line_and_is_invisible() {
    let mut s = MonospaceSurface::new(10.0, 20.0);
    s.set_text("a\nb");
    s.force_layout();
    let g = s.glyphs();
    assert!(!g[1].visible);
    assert_eq!(g[2].quad[0], Point::new(0.0, -20.0));
    assert_eq!(g[0].center(), Point::new(5.0, 10.0));
}

#[test]
fn reset_glyphs_restores_layout() {
    let mut s = MonospaceSurface::default();
    s.set_text("ab");
    s.force_layout();
    s.glyphs_mut()[0].ch = 'X';
    s.glyphs_mut()[1].quad[0] = Point::new(99.0, 99.0);
    s.reset_glyphs();
    assert_eq!(s.laid_out_text(), "ab");
    assert_eq!(s.glyphs()[1].quad[0], Point::new(10.0, 0.0));
}
