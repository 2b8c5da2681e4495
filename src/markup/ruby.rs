use crate::{
    foundation::error::{NovelKitError, NovelKitResult},
    markup::tags::{find_chars, find_tag_start, named_tag_end, tag_end, tag_name},
};

const RUBY_CLOSE: &str = "</ruby>";
const RT_CLOSE: &str = "</rt>";

/// A gloss attached to a run of visible base characters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RubyAnnotation {
    /// Visible index of the first base character.
    pub base_start_index: usize,
    /// Number of visible base characters. Always `> 0`.
    pub base_length: usize,
    /// Text between `<rt>` and `</rt>`, verbatim.
    pub annotation_text: String,
}

/// Result of [`parse_ruby`]: display text with ruby markup removed plus the extracted glosses.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayText {
    /// Output text. Non-ruby tags are passed through verbatim.
    pub output_text: String,
    /// Annotations in source order.
    pub annotations: Vec<RubyAnnotation>,
}

impl DisplayText {
    /// Render each annotation as a `（gloss）` suffix after its base run.
    ///
    /// Insertion points are resolved on the visible stream, so pass-through tags in
    /// `output_text` never shift them.
    pub fn with_parenthetical_glosses(&self) -> String {
        if self.annotations.is_empty() {
            return self.output_text.clone();
        }

        let text: Vec<char> = self.output_text.chars().collect();
        let mut out = String::with_capacity(self.output_text.len() * 2);
        let mut pending = self.annotations.iter().peekable();
        let mut visible = 0usize;
        let mut i = 0usize;

        while i < text.len() {
            if let Some(end) = tag_end(&text, i) {
                out.extend(&text[i..=end]);
                i = end + 1;
                continue;
            }
            out.push(text[i]);
            visible += 1;
            i += 1;

            while let Some(a) = pending.next_if(|a| a.base_start_index + a.base_length <= visible)
            {
                out.push('（');
                out.push_str(&a.annotation_text);
                out.push('）');
            }
        }
        out
    }
}

/// Append `content`, advancing `visible` for every character that is not part of a tag.
fn append_counted(out: &mut String, content: &[char], visible: &mut usize) {
    let mut i = 0usize;
    while i < content.len() {
        if let Some(end) = tag_end(content, i) {
            out.extend(&content[i..=end]);
            i = end + 1;
            continue;
        }
        out.push(content[i]);
        *visible += 1;
        i += 1;
    }
}

/// Split ruby inner content into `(base, gloss)` at the first complete `<rt>...</rt>` pair.
///
/// Anything after `</rt>` inside the ruby element is dropped.
fn split_ruby(content: &[char]) -> Option<(&[char], &[char])> {
    let rt_start = find_tag_start(content, "rt")?;
    let rt_open_end = tag_end(content, rt_start)?;
    let rt_close: Vec<char> = RT_CLOSE.chars().collect();
    let rt_end = find_chars(content, rt_open_end + 1, &rt_close)?;
    Some((&content[..rt_start], &content[rt_open_end + 1..rt_end]))
}

/// Extract `<ruby>base<rt>gloss</rt></ruby>` annotations from `raw`.
///
/// Single left-to-right scan. Malformed markup never fails:
/// - an unterminated `<ruby>` leaks its `<` as one visible character and scanning resumes
///   right after it;
/// - a ruby element without an `<rt>` pair contributes its inner content as plain text;
/// - an unterminated generic `<` is a visible character.
///
/// Closing tags are found by ordinal search, so ruby elements do not nest.
pub fn parse_ruby(raw: &str) -> DisplayText {
    let text: Vec<char> = raw.chars().collect();
    let ruby_close: Vec<char> = RUBY_CLOSE.chars().collect();

    let mut output_text = String::with_capacity(raw.len());
    let mut annotations = Vec::new();
    let mut visible = 0usize;
    let mut i = 0usize;

    while i < text.len() {
        if let Some(open_end) = named_tag_end(&text, i, "ruby") {
            let Some(close_at) = find_chars(&text, open_end + 1, &ruby_close) else {
                output_text.push(text[i]);
                visible += 1;
                i += 1;
                continue;
            };

            let content = &text[open_end + 1..close_at];
            match split_ruby(content) {
                Some((base, gloss)) => {
                    let base_start_index = visible;
                    append_counted(&mut output_text, base, &mut visible);
                    let base_length = visible - base_start_index;
                    if base_length > 0 {
                        annotations.push(RubyAnnotation {
                            base_start_index,
                            base_length,
                            annotation_text: gloss.iter().collect(),
                        });
                    }
                }
                None => append_counted(&mut output_text, content, &mut visible),
            }

            i = close_at + ruby_close.len();
            continue;
        }

        if let Some(end) = tag_end(&text, i) {
            output_text.extend(&text[i..=end]);
            i = end + 1;
            continue;
        }

        output_text.push(text[i]);
        visible += 1;
        i += 1;
    }

    tracing::trace!(
        raw_chars = text.len(),
        annotations = annotations.len(),
        "parsed ruby markup"
    );

    DisplayText {
        output_text,
        annotations,
    }
}

/// [`parse_ruby`] for boundaries where the text may be absent.
pub fn parse_ruby_optional(raw: Option<&str>) -> NovelKitResult<DisplayText> {
    raw.map(parse_ruby)
        .ok_or_else(|| NovelKitError::invalid_argument("ruby source text is absent"))
}

/// Visible index reached after scanning `raw[..raw_index]` (indices in chars).
///
/// Tags are skipped. Content after a tag named `rt` is not counted until a tag named `/rt`;
/// the flag flips on tag names alone, with no nesting depth and no regard for an enclosing
/// `<ruby>`.
pub fn visible_index_at(raw: &str, raw_index: usize) -> NovelKitResult<usize> {
    let text: Vec<char> = raw.chars().collect();
    if raw_index > text.len() {
        return Err(NovelKitError::out_of_range(format!(
            "raw index {raw_index} exceeds text length {}",
            text.len()
        )));
    }

    let mut visible = 0usize;
    let mut in_rt = false;
    let mut i = 0usize;
    while i < raw_index {
        if let Some(end) = tag_end(&text, i) {
            match tag_name(&text, i, end).as_str() {
                "rt" => in_rt = true,
                "/rt" => in_rt = false,
                _ => {}
            }
            i = end + 1;
            continue;
        }
        if !in_rt {
            visible += 1;
        }
        i += 1;
    }
    Ok(visible)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/ruby.rs"]
mod tests;
