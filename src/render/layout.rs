//! Screen geometry.
//!
//! Layout functions take a `Geometry` explicitly instead of asking the terminal, so they can be
//! exercised without one.

/// Divider, status line, input line.
pub const FOOTER_ROWS: usize = 3;

/// Tab bar above document/inspector content.
pub const PANE_HEADER_ROWS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub terminal_width: usize,
    pub terminal_height: usize,
    pub message_area_height: usize,
}

impl Geometry {
    pub fn new(terminal_width: usize, terminal_height: usize) -> Self {
        Self {
            terminal_width,
            terminal_height,
            message_area_height: terminal_height.saturating_sub(FOOTER_ROWS),
        }
    }

    pub fn divider_row(&self) -> usize {
        self.message_area_height
    }

    pub fn status_row(&self) -> usize {
        self.message_area_height + 1
    }

    pub fn input_row(&self) -> usize {
        self.message_area_height + 2
    }

    /// Rows left for pane content under the tab bar.
    pub fn pane_content_height(&self) -> usize {
        self.message_area_height.saturating_sub(PANE_HEADER_ROWS)
    }

    /// Usable columns; the last column is left empty so writes never trigger autowrap.
    pub fn content_width(&self) -> usize {
        self.terminal_width.saturating_sub(1).max(1)
    }
}
