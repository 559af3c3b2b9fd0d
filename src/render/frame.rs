//! Typed render model: styled spans, lines, and a frame of rows.

use crate::core::terminal::Style;
use crate::core::text::width::WidthOracle;

/// A contiguous run of text drawn with one style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Span {
    text: String,
    style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// A single rendered row.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Span::plain(text)])
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(vec![Span::new(text, style)])
    }

    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        self.spans.push(span);
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn width(&self, oracle: &dyn WidthOracle) -> usize {
        self.spans
            .iter()
            .map(|span| oracle.text_width(&span.text))
            .sum()
    }

    /// Text without styling, mostly for assertions.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            out.push_str(span.as_str());
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

/// A full screen: one line per terminal row plus the hardware cursor position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    lines: Vec<Line>,
    cursor: Option<CursorPos>,
}

impl Frame {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<CursorPos>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cursor(&self) -> Option<CursorPos> {
        self.cursor
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}
