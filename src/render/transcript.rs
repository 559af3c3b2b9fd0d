//! Transcript content area: the visible suffix of entries, drawn top-down and clipped at the
//! bottom of the message area.

use crate::core::terminal::{Color, Style};
use crate::core::text::markup::StyledSegment;
use crate::core::text::utils::{collapse_whitespace, truncate_to_width};
use crate::core::text::width::WidthOracle;
use crate::render::frame::{Line, Span};
use crate::render::layout::Geometry;
use crate::state::transcript::{
    layout_entry, select_visible, EntryKind, RowBudget, TranscriptEntry, SYSTEM_SPEAKER,
};

const ELLIPSIS: &str = "...";

const NAME_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Stable per-speaker name color; System is always yellow.
pub fn speaker_style(speaker: &str) -> Style {
    if speaker == SYSTEM_SPEAKER {
        return Style::plain().fg(Color::Yellow).bold();
    }
    // FNV-1a keeps the mapping stable across runs.
    let mut hash: u32 = 0x811c_9dc5;
    for byte in speaker.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    let color = NAME_PALETTE[hash as usize % NAME_PALETTE.len()];
    Style::plain().fg(color).bold()
}

fn segment_style(segment: &StyledSegment) -> Style {
    if segment.is_action {
        Style::dimmed()
    } else {
        Style::PLAIN
    }
}

/// Lines for one entry at `terminal_width`.
pub fn entry_lines(
    entry: &TranscriptEntry,
    terminal_width: usize,
    oracle: &dyn WidthOracle,
) -> Vec<Line> {
    let budget = RowBudget::new(terminal_width);
    match entry.kind {
        EntryKind::Action => {
            let prefix = budget.prefix(&entry.speaker, oracle);
            let name_width = oracle.text_width(&prefix);
            let body = collapse_whitespace(&entry.body);
            let text_width = budget.max_text_width(name_width);
            let body = truncate_to_width(&body, text_width, ELLIPSIS, oracle);
            let mut line = Line::default();
            line.push(Span::new(prefix, speaker_style(&entry.speaker).dim()));
            line.push(Span::new(body, Style::dimmed()));
            vec![line]
        }
        EntryKind::Normal => {
            let layout = layout_entry(entry, budget, oracle);
            let indent = " ".repeat(layout.name_width);
            let name_style = speaker_style(&entry.speaker);

            let mut lines = Vec::with_capacity(layout.lines.len().max(1));
            for (index, wrapped) in layout.lines.iter().enumerate() {
                let mut line = Line::default();
                if index == 0 {
                    line.push(Span::new(layout.prefix.clone(), name_style));
                } else {
                    line.push(Span::plain(indent.clone()));
                }
                for segment in wrapped {
                    line.push(Span::new(segment.text.clone(), segment_style(segment)));
                }
                lines.push(line);
            }
            if lines.is_empty() {
                lines.push(Line::styled(layout.prefix, name_style));
            }
            lines
        }
    }
}

/// Rows for the message area, at most `geometry.message_area_height` of them.
pub fn render_transcript(
    entries: &[TranscriptEntry],
    geometry: Geometry,
    oracle: &dyn WidthOracle,
) -> Vec<Line> {
    let rows = geometry.message_area_height;
    let budget = RowBudget::new(geometry.terminal_width);
    let window = select_visible(entries, rows, budget, oracle);

    let mut lines = Vec::with_capacity(rows);
    for entry in &entries[window.start..] {
        for line in entry_lines(entry, geometry.terminal_width, oracle) {
            if lines.len() == rows {
                return lines;
            }
            lines.push(line);
        }
    }
    lines
}
