//! Width-budgeted wrapping of styled segments.

use super::markup::StyledSegment;
use super::width::{glyphs, WidthOracle};

pub type WrappedLine = Vec<StyledSegment>;

/// Wrap `segments` so that every returned line fits in `max_width` columns.
///
/// Glyphs are fitted one at a time and never split; a segment split across lines keeps its
/// `is_action` flag on both halves. The only line that may exceed the budget is one holding a
/// single glyph wider than the whole budget. Always returns at least one line.
pub fn wrap(
    segments: &[StyledSegment],
    max_width: usize,
    oracle: &dyn WidthOracle,
) -> Vec<WrappedLine> {
    let max_width = max_width.max(1);
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current: WrappedLine = Vec::new();
    let mut current_width = 0;

    for segment in segments {
        let mut piece = String::new();

        for glyph in glyphs(&segment.text) {
            let width = oracle.glyph_width(glyph);
            let line_empty = current_width == 0 && piece.is_empty() && current.is_empty();
            if current_width + width > max_width && !line_empty {
                push_piece(&mut current, &mut piece, segment.is_action);
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            piece.push_str(glyph);
            current_width += width;
        }

        push_piece(&mut current, &mut piece, segment.is_action);
    }

    lines.push(current);
    lines
}

fn push_piece(line: &mut WrappedLine, piece: &mut String, is_action: bool) {
    if piece.is_empty() {
        return;
    }
    line.push(StyledSegment {
        text: std::mem::take(piece),
        is_action,
    });
}

pub fn line_width(line: &[StyledSegment], oracle: &dyn WidthOracle) -> usize {
    line.iter()
        .map(|segment| oracle.text_width(&segment.text))
        .sum()
}
