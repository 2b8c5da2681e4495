//! Char-level tag scanning shared by the ruby parser and the reference surface.
//!
//! All positions are indices into a `[char]` buffer, not byte offsets.

/// Index of the `>` closing a tag that opens at `start`.
///
/// Returns `None` when `text[start]` is not `<` or no `>` follows.
pub(crate) fn tag_end(text: &[char], start: usize) -> Option<usize> {
    if text.get(start) != Some(&'<') {
        return None;
    }
    text[start + 1..]
        .iter()
        .position(|&c| c == '>')
        .map(|off| start + 1 + off)
}

/// True when `name` sits at `at` and is followed by `>` or whitespace.
fn name_matches(text: &[char], at: usize, name: &str) -> bool {
    let mut i = at;
    for expected in name.chars() {
        if text.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    matches!(text.get(i), Some(&c) if c == '>' || c.is_whitespace())
}

/// Index of the `>` closing an opening tag `<name>` / `<name attrs>` that starts at `start`.
pub(crate) fn named_tag_end(text: &[char], start: usize, name: &str) -> Option<usize> {
    if text.get(start) != Some(&'<') || !name_matches(text, start + 1, name) {
        return None;
    }
    tag_end(text, start)
}

/// Position of the first `<name>` / `<name attrs` opener in `text`.
pub(crate) fn find_tag_start(text: &[char], name: &str) -> Option<usize> {
    text.iter()
        .enumerate()
        .filter(|&(_, &c)| c == '<')
        .map(|(i, _)| i)
        .find(|&i| name_matches(text, i + 1, name))
}

/// Tag name of the tag spanning `start..=end`: the text between the brackets up to the first space.
pub(crate) fn tag_name(text: &[char], start: usize, end: usize) -> String {
    text[start + 1..end]
        .iter()
        .take_while(|&&c| c != ' ')
        .collect()
}

/// First occurrence of `needle` in `text` at or after `from` (plain ordinal search).
pub(crate) fn find_chars(text: &[char], from: usize, needle: &[char]) -> Option<usize> {
    if needle.is_empty() || from > text.len() {
        return None;
    }
    text[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|off| from + off)
}

/// Copy `text` with every complete `<...>` run removed.
///
/// An unterminated `<` is kept as content.
pub(crate) fn strip_tags(text: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut i = 0usize;
    while i < text.len() {
        if let Some(end) = tag_end(text, i) {
            i = end + 1;
            continue;
        }
        out.push(text[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/markup/tags.rs"]
mod tests;
