//! Footer rows: pane divider, status line, input line.

use crate::core::terminal::{Color, Style};
use crate::core::text::utils::{tail_to_width, truncate_to_width};
use crate::core::text::width::WidthOracle;
use crate::render::frame::{Line, Span};
use crate::state::status::StatusModel;
use crate::state::view::PaneKind;

pub const INPUT_PROMPT: &str = "> ";
const DIVIDER_GLYPH: &str = "─";
const MAX_DOTS: u64 = 3;

/// Animated dot count in `1..=3`, derived from wall-clock time so every redraw agrees.
pub fn dot_count(epoch_ms: u128, tick_ms: u64) -> usize {
    let tick = u128::from(tick_ms.max(1));
    ((epoch_ms / tick) % u128::from(MAX_DOTS)) as usize + 1
}

/// Horizontal rule naming the panes, the active one highlighted.
pub fn divider_line(active: PaneKind, width: usize, oracle: &dyn WidthOracle) -> Line {
    let rule = Style::plain().fg(Color::Gray);
    let mut line = Line::default();
    let mut used = 0;

    for pane in PaneKind::ORDER {
        let label = format!("{DIVIDER_GLYPH} {} ", pane.label());
        let label_width = oracle.text_width(&label);
        if used + label_width > width {
            break;
        }
        used += label_width;
        line.push(Span::new(format!("{DIVIDER_GLYPH} "), rule));
        let style = if pane == active {
            Style::plain().fg(Color::Cyan).bold()
        } else {
            Style::dimmed()
        };
        line.push(Span::new(pane.label(), style));
        line.push(Span::plain(" "));
    }

    let fill = width.saturating_sub(used);
    line.push(Span::new(DIVIDER_GLYPH.repeat(fill), rule));
    line
}

pub fn usage_text(status: &StatusModel) -> String {
    format!(
        "in: {} out: {} | ${:.4}",
        status.total_input_tokens(),
        status.total_output_tokens(),
        status.cumulative_cost()
    )
}

/// Indicator phrases with `dots` appended on the left, usage counters right-aligned.
pub fn status_line(
    status: &StatusModel,
    dots: usize,
    width: usize,
    oracle: &dyn WidthOracle,
) -> Line {
    let usage = usage_text(status);
    let usage_width = oracle.text_width(&usage);
    let mut line = Line::default();

    if usage_width >= width {
        line.push(Span::new(
            truncate_to_width(&usage, width, "...", oracle),
            Style::dimmed(),
        ));
        return line;
    }

    let mut used = 0;
    if let Some(indicator) = status.indicator_text() {
        let text = format!("{indicator}{}", ".".repeat(dots));
        let room = width.saturating_sub(usage_width + 1);
        let text = truncate_to_width(&text, room, "...", oracle);
        used = oracle.text_width(&text);
        line.push(Span::new(text, Style::plain().fg(Color::Yellow)));
    }

    line.push(Span::plain(" ".repeat(width - usage_width - used)));
    line.push(Span::new(usage, Style::dimmed()));
    line
}

/// The prompt plus the tail of the input that fits, and the cursor column after it.
pub fn input_line(input: &str, width: usize, oracle: &dyn WidthOracle) -> (Line, usize) {
    let prompt_width = oracle.text_width(INPUT_PROMPT);
    let visible = tail_to_width(input, width.saturating_sub(prompt_width), oracle);
    let cursor_col = prompt_width + oracle.text_width(&visible);

    let mut line = Line::default();
    line.push(Span::new(INPUT_PROMPT, Style::plain().bold()));
    line.push(Span::plain(visible));
    (line, cursor_col)
}

#[cfg(test)]
mod tests {
    use super::{divider_line, dot_count, input_line, status_line};
    use crate::core::text::width::UnicodeWidth;
    use crate::state::status::StatusModel;
    use crate::state::view::PaneKind;
    use std::time::Instant;

    #[test]
    fn dots_cycle_one_to_three() {
        assert_eq!(dot_count(0, 500), 1);
        assert_eq!(dot_count(499, 500), 1);
        assert_eq!(dot_count(500, 500), 2);
        assert_eq!(dot_count(1_000, 500), 3);
        assert_eq!(dot_count(1_500, 500), 1);
        assert_eq!(dot_count(7, 0), 2);
    }

    #[test]
    fn idle_status_right_aligns_usage() {
        let status = StatusModel::new();
        let line = status_line(&status, 1, 30, &UnicodeWidth);
        assert_eq!(line.text(), format!("{}in: 0 out: 0 | $0.0000", " ".repeat(8)));
        assert_eq!(line.width(&UnicodeWidth), 30);
    }

    #[test]
    fn indicator_gets_dots_and_truncates_before_usage() {
        let mut status = StatusModel::new();
        status.set_thinking("Alice", Instant::now());
        status.record_usage(12, 3, Some(0.25));

        let line = status_line(&status, 2, 60, &UnicodeWidth);
        let text = line.text();
        assert!(text.starts_with("Alice is thinking.."));
        assert!(text.ends_with("in: 12 out: 3 | $0.2500"));
        assert_eq!(line.width(&UnicodeWidth), 60);

        let narrow = status_line(&status, 2, 35, &UnicodeWidth);
        assert_eq!(narrow.text(), "Alice is... in: 12 out: 3 | $0.2500");
    }

    #[test]
    fn input_line_keeps_the_tail_visible() {
        let (line, col) = input_line("hello", 20, &UnicodeWidth);
        assert_eq!(line.text(), "> hello");
        assert_eq!(col, 7);

        let (line, col) = input_line("abcdefghij", 6, &UnicodeWidth);
        assert_eq!(line.text(), "> ghij");
        assert_eq!(col, 6);
    }

    #[test]
    fn divider_fills_the_row() {
        let line = divider_line(PaneKind::Document, 40, &UnicodeWidth);
        assert!(line.text().starts_with("─ Chat ─ Documents ─ Agents ─"));
        assert_eq!(line.width(&UnicodeWidth), 40);
    }
}
