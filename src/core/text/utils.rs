//! Truncation helpers.

use super::width::{glyphs, WidthOracle};

/// Truncate from the right, appending `ellipsis` when anything was cut.
pub fn truncate_to_width(
    text: &str,
    max_width: usize,
    ellipsis: &str,
    oracle: &dyn WidthOracle,
) -> String {
    if max_width == 0 {
        return String::new();
    }

    if oracle.text_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = oracle.text_width(ellipsis);
    if ellipsis_width >= max_width {
        return take_prefix(ellipsis, max_width, oracle);
    }

    let mut truncated = take_prefix(text, max_width - ellipsis_width, oracle);
    truncated.push_str(ellipsis);
    truncated
}

/// Keep the widest suffix of `text` that fits; used for the input line so the caret end
/// stays visible.
pub fn tail_to_width(text: &str, max_width: usize, oracle: &dyn WidthOracle) -> String {
    if oracle.text_width(text) <= max_width {
        return text.to_string();
    }

    let clusters: Vec<&str> = glyphs(text).collect();
    let mut width = 0;
    let mut start = clusters.len();
    while start > 0 {
        let next = oracle.glyph_width(clusters[start - 1]);
        if width + next > max_width {
            break;
        }
        width += next;
        start -= 1;
    }
    clusters[start..].concat()
}

fn take_prefix(text: &str, max_width: usize, oracle: &dyn WidthOracle) -> String {
    let mut out = String::new();
    let mut width = 0;
    for glyph in glyphs(text) {
        let next = oracle.glyph_width(glyph);
        if width + next > max_width {
            break;
        }
        out.push_str(glyph);
        width += next;
    }
    out
}

/// Collapse every run of whitespace (newlines included) into one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
