//! Width oracle: the single source of column widths for all layout math.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

pub trait WidthOracle {
    /// Rendered width of one glyph (grapheme cluster).
    fn glyph_width(&self, glyph: &str) -> usize;

    /// Rendered width of arbitrary text.
    fn text_width(&self, text: &str) -> usize {
        glyphs(text).map(|glyph| self.glyph_width(glyph)).sum()
    }
}

/// Iterate extended grapheme clusters; these are the units wrapping never splits.
pub fn glyphs(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

/// Default oracle backed by `unicode-width`, with RGI emoji forced to two columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidth;

impl WidthOracle for UnicodeWidth {
    fn glyph_width(&self, glyph: &str) -> usize {
        grapheme_width(glyph)
    }
}

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }

    if emoji_get(grapheme).is_some() {
        return 2;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}
