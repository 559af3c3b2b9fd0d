//! Tabbed panes. Documents and inspector records render through the same [`Pane`] trait: a
//! tab bar on the first row, then the selected tab's content from the scroll offset down.

use crate::core::terminal::{Color, Style};
use crate::core::text::markup::StyledSegment;
use crate::core::text::utils::truncate_to_width;
use crate::core::text::width::WidthOracle;
use crate::core::text::wrap::wrap;
use crate::render::frame::{Line, Span};
use crate::render::layout::Geometry;
use crate::state::documents::DocumentSet;
use crate::state::inspector::{InspectorRecord, InspectorSet};
use crate::state::view::{PaneBounds, PaneCursor, PaneKind};
use crate::state::ConsoleState;

const TAB_SEPARATOR: &str = "  ";
const EMPTY_PLACEHOLDER: &str = "(nothing here yet)";

pub trait Pane {
    fn title(&self) -> &str;

    fn tab_labels(&self) -> Vec<String>;

    /// Selection clamped to the current tabs.
    fn selected_index(&self) -> usize;

    /// Content of the selected tab wrapped to `width` columns.
    fn content_lines(&self, width: usize, oracle: &dyn WidthOracle) -> Vec<Line>;

    fn scroll_offset(&self) -> usize;
}

fn clamp_selection(selected: usize, tab_count: usize) -> usize {
    selected.min(tab_count.saturating_sub(1))
}

/// Wrap plain text, one or more rows per `\n` sub-line.
fn wrap_plain(text: &str, width: usize, style: Style, oracle: &dyn WidthOracle) -> Vec<Line> {
    let mut lines = Vec::new();
    for sub_line in text.split('\n') {
        for wrapped in wrap(&[StyledSegment::plain(sub_line)], width, oracle) {
            let mut line = Line::default();
            for segment in wrapped {
                line.push(Span::new(segment.text, style));
            }
            lines.push(line);
        }
    }
    lines
}

pub struct DocumentPane<'a> {
    documents: &'a DocumentSet,
    cursor: PaneCursor,
}

impl<'a> DocumentPane<'a> {
    pub fn new(documents: &'a DocumentSet, cursor: PaneCursor) -> Self {
        Self { documents, cursor }
    }
}

impl Pane for DocumentPane<'_> {
    fn title(&self) -> &str {
        PaneKind::Document.label()
    }

    fn tab_labels(&self) -> Vec<String> {
        self.documents.names().map(str::to_string).collect()
    }

    fn selected_index(&self) -> usize {
        clamp_selection(self.cursor.selected, self.documents.len())
    }

    fn content_lines(&self, width: usize, oracle: &dyn WidthOracle) -> Vec<Line> {
        match self.documents.get_index(self.selected_index()) {
            Some((_, text)) => wrap_plain(text, width, Style::PLAIN, oracle),
            None => vec![Line::styled(EMPTY_PLACEHOLDER, Style::dimmed())],
        }
    }

    fn scroll_offset(&self) -> usize {
        self.cursor.scroll_offset
    }
}

pub struct InspectorPane<'a> {
    records: &'a InspectorSet,
    cursor: PaneCursor,
}

impl<'a> InspectorPane<'a> {
    pub fn new(records: &'a InspectorSet, cursor: PaneCursor) -> Self {
        Self { records, cursor }
    }
}

fn section_header(title: String) -> Line {
    Line::styled(title, Style::plain().fg(Color::Cyan).bold())
}

fn record_lines(record: &InspectorRecord, width: usize, oracle: &dyn WidthOracle) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(section_header("Summary".to_string()));
    if record.summary.is_empty() {
        lines.push(Line::styled("(none)", Style::dimmed()));
    } else {
        lines.extend(wrap_plain(&record.summary, width, Style::PLAIN, oracle));
    }

    lines.push(Line::default());
    lines.push(section_header("Memories".to_string()));
    push_bullets(&mut lines, &record.memories, width, oracle);

    for (target, memories) in &record.entity_memories {
        lines.push(Line::default());
        lines.push(section_header(format!("About {target}")));
        push_bullets(&mut lines, memories, width, oracle);
    }

    for (name, text) in &record.documents {
        lines.push(Line::default());
        lines.push(section_header(format!("Document: {name}")));
        lines.extend(wrap_plain(text, width, Style::PLAIN, oracle));
    }

    lines
}

/// Padding slots from sparse patches are empty and skipped.
fn push_bullets(lines: &mut Vec<Line>, items: &[String], width: usize, oracle: &dyn WidthOracle) {
    let mut any = false;
    for item in items.iter().filter(|item| !item.is_empty()) {
        any = true;
        let inner = width.saturating_sub(2).max(1);
        for (index, line) in wrap_plain(item, inner, Style::PLAIN, oracle)
            .iter()
            .enumerate()
        {
            let lead = if index == 0 { "- " } else { "  " };
            let mut spans = vec![Span::plain(lead)];
            spans.extend(line.spans().iter().cloned());
            lines.push(Line::new(spans));
        }
    }
    if !any {
        lines.push(Line::styled("(none)", Style::dimmed()));
    }
}

impl Pane for InspectorPane<'_> {
    fn title(&self) -> &str {
        PaneKind::Inspector.label()
    }

    fn tab_labels(&self) -> Vec<String> {
        self.records
            .records()
            .iter()
            .map(|record| record.name.clone())
            .collect()
    }

    fn selected_index(&self) -> usize {
        clamp_selection(self.cursor.selected, self.records.len())
    }

    fn content_lines(&self, width: usize, oracle: &dyn WidthOracle) -> Vec<Line> {
        match self.records.get(self.selected_index()) {
            Some(record) => record_lines(record, width, oracle),
            None => vec![Line::styled(EMPTY_PLACEHOLDER, Style::dimmed())],
        }
    }

    fn scroll_offset(&self) -> usize {
        self.cursor.scroll_offset
    }
}

/// The tab bar: the pane title, then every tab with the selected one highlighted.
pub fn tab_bar(pane: &dyn Pane, width: usize, oracle: &dyn WidthOracle) -> Line {
    let selected = pane.selected_index();
    let mut line = Line::default();
    let mut used = 0;

    let title = truncate_to_width(&format!("{}:", pane.title()), width, "...", oracle);
    used += oracle.text_width(&title);
    line.push(Span::new(title, Style::plain().bold()));

    for (index, label) in pane.tab_labels().into_iter().enumerate() {
        let style = if index == selected {
            Style::plain().fg(Color::Cyan).bold()
        } else {
            Style::dimmed()
        };
        let text = if index == selected {
            format!("[{label}]")
        } else {
            label
        };

        let remaining = width.saturating_sub(used + TAB_SEPARATOR.len());
        if remaining == 0 {
            break;
        }
        let text = truncate_to_width(&text, remaining, "...", oracle);
        used += TAB_SEPARATOR.len() + oracle.text_width(&text);
        line.push(Span::plain(TAB_SEPARATOR));
        line.push(Span::new(text, style));
    }
    line
}

pub fn bounds(pane: &dyn Pane, geometry: Geometry, oracle: &dyn WidthOracle) -> PaneBounds {
    PaneBounds {
        tab_count: pane.tab_labels().len(),
        content_lines: pane.content_lines(geometry.content_width(), oracle).len(),
        visible_height: geometry.pane_content_height(),
    }
}

/// Rows for the message area while a tabbed pane is active.
pub fn render_pane(pane: &dyn Pane, geometry: Geometry, oracle: &dyn WidthOracle) -> Vec<Line> {
    if geometry.message_area_height == 0 {
        return Vec::new();
    }
    let width = geometry.content_width();
    let mut lines = vec![tab_bar(pane, width, oracle)];

    let content = pane.content_lines(width, oracle);
    let visible = geometry.pane_content_height();
    let max_scroll = content.len().saturating_sub(visible);
    let offset = pane.scroll_offset().min(max_scroll);
    lines.extend(content.into_iter().skip(offset).take(visible));
    lines
}

/// Apply `f` to the pane for `kind`, or return `None` for the transcript.
pub fn with_pane<R>(
    state: &ConsoleState,
    kind: PaneKind,
    f: impl FnOnce(&dyn Pane) -> R,
) -> Option<R> {
    let cursor = state.view.cursor(kind)?;
    match kind {
        PaneKind::Transcript => None,
        PaneKind::Document => Some(f(&DocumentPane::new(&state.documents, cursor))),
        PaneKind::Inspector => Some(f(&InspectorPane::new(&state.inspector, cursor))),
    }
}

/// Bounds of the active pane; all zero for the transcript.
pub fn active_bounds(
    state: &ConsoleState,
    geometry: Geometry,
    oracle: &dyn WidthOracle,
) -> PaneBounds {
    with_pane(state, state.view.active(), |pane| bounds(pane, geometry, oracle)).unwrap_or_default()
}
