//! Screen renderer: turns console state into `TerminalCmd`s for full and partial redraws.
//!
//! Full redraws clear the screen and repaint every row. Partial redraws (content area, status
//! line, input line) are bracketed save/hide ... restore/show so the hardware cursor stays on the
//! input line between draws.

use crate::core::output::TerminalCmd;
use crate::core::text::width::WidthOracle;
use crate::render::frame::{CursorPos, Frame, Line};
use crate::render::layout::Geometry;
use crate::render::pane::{render_pane, with_pane};
use crate::render::status::{divider_line, input_line, status_line};
use crate::render::transcript::render_transcript;
use crate::state::view::PaneKind;
use crate::state::ConsoleState;

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn line_cmds(cmds: &mut Vec<TerminalCmd>, line: &Line) {
    for span in line.spans() {
        cmds.push(TerminalCmd::text(span.as_str(), span.style()));
    }
}

pub struct ScreenRenderer<'a> {
    state: &'a ConsoleState,
    geometry: Geometry,
    oracle: &'a dyn WidthOracle,
    dots: usize,
}

impl<'a> ScreenRenderer<'a> {
    /// `dots` is the status animation frame, see [`crate::render::status::dot_count`].
    pub fn new(
        state: &'a ConsoleState,
        geometry: Geometry,
        oracle: &'a dyn WidthOracle,
        dots: usize,
    ) -> Self {
        Self {
            state,
            geometry,
            oracle,
            dots,
        }
    }

    /// Message area rows for whichever pane is active.
    pub fn content_lines(&self) -> Vec<Line> {
        let active = self.state.view.active();
        if active == PaneKind::Transcript {
            return render_transcript(self.state.transcript.entries(), self.geometry, self.oracle);
        }
        with_pane(self.state, active, |pane| {
            render_pane(pane, self.geometry, self.oracle)
        })
        .unwrap_or_default()
    }

    pub fn divider_line(&self) -> Line {
        divider_line(
            self.state.view.active(),
            self.geometry.content_width(),
            self.oracle,
        )
    }

    pub fn status_line(&self) -> Line {
        status_line(
            &self.state.status,
            self.dots,
            self.geometry.content_width(),
            self.oracle,
        )
    }

    pub fn input_line(&self) -> (Line, CursorPos) {
        let (line, col) = input_line(
            self.state.status.input(),
            self.geometry.content_width(),
            self.oracle,
        );
        let cursor = CursorPos {
            row: self.geometry.input_row(),
            col,
        };
        (line, cursor)
    }

    /// Every row of the screen, top to bottom, with the cursor on the input line.
    pub fn frame(&self) -> Frame {
        let rows = self.geometry.terminal_height;
        let mut lines = self.content_lines();
        lines.resize(self.geometry.message_area_height, Line::default());
        lines.push(self.divider_line());
        lines.push(self.status_line());
        let (input, cursor) = self.input_line();
        lines.push(input);
        lines.truncate(rows);

        let cursor = (cursor.row < rows).then_some(cursor);
        Frame::new(lines).with_cursor(cursor)
    }

    pub fn full_cmds(&self) -> Vec<TerminalCmd> {
        let frame = self.frame();
        let mut cmds = vec![TerminalCmd::HideCursor, TerminalCmd::ClearScreen];
        for (row, line) in frame.lines().iter().enumerate() {
            if line.spans().is_empty() {
                continue;
            }
            cmds.push(TerminalCmd::MoveTo {
                row: to_u16(row),
                col: 0,
            });
            line_cmds(&mut cmds, line);
        }
        if let Some(cursor) = frame.cursor() {
            cmds.push(TerminalCmd::MoveTo {
                row: to_u16(cursor.row),
                col: to_u16(cursor.col),
            });
        }
        cmds.push(TerminalCmd::ShowCursor);
        cmds
    }

    /// Repaint the message area only; rows past the content are cleared.
    pub fn content_cmds(&self) -> Vec<TerminalCmd> {
        let mut lines = self.content_lines();
        lines.resize(self.geometry.message_area_height, Line::default());
        self.partial(0, &lines)
    }

    pub fn status_cmds(&self) -> Vec<TerminalCmd> {
        if self.geometry.status_row() >= self.geometry.terminal_height {
            return Vec::new();
        }
        let line = self.status_line();
        self.partial(self.geometry.status_row(), std::slice::from_ref(&line))
    }

    /// Repaint the input line and park the cursor after the visible input.
    pub fn input_cmds(&self) -> Vec<TerminalCmd> {
        if self.geometry.input_row() >= self.geometry.terminal_height {
            return Vec::new();
        }
        let (line, cursor) = self.input_line();
        let mut cmds = self.partial(self.geometry.input_row(), std::slice::from_ref(&line));
        // `partial` ends with ShowCursor; move first so the cursor never flashes at the old spot.
        let show = cmds.pop();
        cmds.push(TerminalCmd::MoveTo {
            row: to_u16(cursor.row),
            col: to_u16(cursor.col),
        });
        cmds.extend(show);
        cmds
    }

    fn partial(&self, first_row: usize, lines: &[Line]) -> Vec<TerminalCmd> {
        let mut cmds = vec![TerminalCmd::SaveCursor, TerminalCmd::HideCursor];
        for (offset, line) in lines.iter().enumerate() {
            cmds.push(TerminalCmd::MoveTo {
                row: to_u16(first_row + offset),
                col: 0,
            });
            cmds.push(TerminalCmd::ClearLine);
            line_cmds(&mut cmds, line);
        }
        cmds.push(TerminalCmd::RestoreCursor);
        cmds.push(TerminalCmd::ShowCursor);
        cmds
    }
}
