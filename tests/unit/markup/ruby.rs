use super::*;

fn raw_pos(text: &str, needle: &str) -> usize {
    let byte = text.find(needle).unwrap();
    text[..byte].chars().count()
}

#[test]
fn extracts_single_annotation() {
    let d = parse_ruby("これは<ruby>漢字<rt>かんじ</rt></ruby>です");
    assert_eq!(d.output_text, "これは漢字です");
    assert_eq!(
        d.annotations,
        vec![RubyAnnotation {
            base_start_index: 3,
            base_length: 2,
            annotation_text: "かんじ".to_owned(),
        }]
    );
}

#[test]
fn pass_through_tags_do_not_shift_indices() {
    let d = parse_ruby("<color=red>赤</color><ruby>青<rt>あお</rt></ruby>");
    assert_eq!(d.output_text, "<color=red>赤</color>青");
    assert_eq!(d.annotations.len(), 1);
    assert_eq!(d.annotations[0].base_start_index, 1);
    assert_eq!(d.annotations[0].base_length, 1);
    assert_eq!(d.annotations[0].annotation_text, "あお");
}

#[test]
fn multiple_annotations_keep_source_order() {
    let d = parse_ruby("<ruby>小説<rt>しょうせつ</rt></ruby>の<ruby>演出<rt>えんしゅつ</rt></ruby>");
    assert_eq!(d.output_text, "小説の演出");
    let starts: Vec<_> = d.annotations.iter().map(|a| a.base_start_index).collect();
    assert_eq!(starts, vec![0, 3]);
}

#[test]
fn empty_base_is_dropped() {
    let d = parse_ruby("x<ruby><rt>gloss</rt></ruby>y");
    assert_eq!(d.output_text, "xy");
    assert!(d.annotations.is_empty());
}

#[test]
fn ruby_without_rt_keeps_content_as_text() {
    let d = parse_ruby("<ruby><b>太</b>字</ruby>!");
    assert_eq!(d.output_text, "<b>太</b>字!");
    assert!(d.annotations.is_empty());
}

#[test]
fn tags_inside_base_pass_through_uncounted() {
    let d = parse_ruby("a<ruby><i>漢</i>字<rt>かんじ</rt></ruby>");
    assert_eq!(d.output_text, "a<i>漢</i>字");
    assert_eq!(d.annotations[0].base_start_index, 1);
    assert_eq!(d.annotations[0].base_length, 2);
}

#[test]
fn unterminated_ruby_leaks_only_the_bracket() {
    let d = parse_ruby("<ruby>漢字");
    assert_eq!(d.output_text, "<ruby>漢字");
    assert!(d.annotations.is_empty());
}

#[test]
fn unterminated_generic_tag_is_content() {
    let d = parse_ruby("1 < 2");
    assert_eq!(d.output_text, "1 < 2");
}

#[test]
fn nested_ruby_is_not_a_separate_unit() {
    let d = parse_ruby("<ruby>a<ruby>b<rt>x</rt></ruby>c</ruby>");
    // Ordinal closer search pairs the outer opener with the first `</ruby>`.
    assert_eq!(d.output_text, "a<ruby>bc</ruby>");
    assert_eq!(d.annotations.len(), 1);
    assert_eq!(d.annotations[0].base_start_index, 0);
    assert_eq!(d.annotations[0].base_length, 2);
    assert_eq!(d.annotations[0].annotation_text, "x");
}

#[test]
fn optional_source_rejects_absent_text() {
    assert!(matches!(
        parse_ruby_optional(None),
        Err(NovelKitError::InvalidArgument(_))
    ));
    assert_eq!(parse_ruby_optional(Some("abc")).unwrap().output_text, "abc");
}

#[test]
fn visible_index_skips_rt_and_tags() {
    let text = "A<ruby>漢字<rt>かんじ</rt></ruby><b>B</b>";
    assert_eq!(visible_index_at(text, raw_pos(text, "漢字")).unwrap(), 1);
    assert_eq!(visible_index_at(text, raw_pos(text, "B")).unwrap(), 3);
}

#[test]
fn visible_index_bounds() {
    let text = "ab";
    assert_eq!(visible_index_at(text, 0).unwrap(), 0);
    assert_eq!(visible_index_at(text, 2).unwrap(), 2);
    assert!(matches!(
        visible_index_at(text, 3),
        Err(NovelKitError::OutOfRange(_))
    ));
}

#[test]
fn rt_flag_ignores_ruby_context() {
    let text = "a<rt>bc</rt>d";
    assert_eq!(visible_index_at(text, text.chars().count()).unwrap(), 2);
}

#[test]
fn glosses_are_inserted_after_base_runs() {
    let d = parse_ruby("<b>これは</b><ruby>漢字<rt>かんじ</rt></ruby>です");
    assert_eq!(d.with_parenthetical_glosses(), "<b>これは</b>漢字（かんじ）です");
}

#[test]
fn glosses_without_annotations_return_output() {
    let d = parse_ruby("plain");
    assert_eq!(d.with_parenthetical_glosses(), "plain");
}
