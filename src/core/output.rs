//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.

use std::io::{self, Write};

use crate::core::terminal::{Style, Terminal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    MoveTo { row: u16, col: u16 },
    ClearLine,
    ClearScreen,

    /// Cursor bracketing for partial updates.
    SaveCursor,
    RestoreCursor,
    HideCursor,
    ShowCursor,

    Text { text: String, style: Style },
}

impl TerminalCmd {
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self::Text {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Flush buffered commands to the terminal.
    ///
    /// This is the single write gate: `Terminal` drawing methods must not be called from
    /// anywhere else.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) -> io::Result<()> {
        for cmd in self.cmds.drain(..) {
            match cmd {
                TerminalCmd::MoveTo { row, col } => term.move_to(row, col),
                TerminalCmd::ClearLine => term.clear_line(),
                TerminalCmd::ClearScreen => term.clear_screen(),
                TerminalCmd::SaveCursor => term.save_cursor(),
                TerminalCmd::RestoreCursor => term.restore_cursor(),
                TerminalCmd::HideCursor => term.hide_cursor(),
                TerminalCmd::ShowCursor => term.show_cursor(),
                TerminalCmd::Text { text, style } => term.write_styled(&text, style),
            }
        }
        term.flush()
    }
}

/// Build the SGR sequence for a style; empty for the plain style.
pub fn sgr_sequence(style: Style) -> String {
    if style.is_plain() {
        return String::new();
    }
    let mut params: Vec<&str> = Vec::new();
    if style.bold {
        params.push("1");
    }
    if style.dim {
        params.push("2");
    }
    if let Some(color) = style.color {
        params.push(color.sgr());
    }
    format!("\x1b[{}m", params.join(";"))
}

/// [`Terminal`] implementation that emits ANSI escapes into any writer.
///
/// The size is whatever the host last reported via [`AnsiTerminal::set_size`].
pub struct AnsiTerminal<W: Write> {
    out: W,
    columns: u16,
    rows: u16,
    write_error: Option<io::Error>,
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W, columns: u16, rows: u16) -> Self {
        Self {
            out,
            columns,
            rows,
            write_error: None,
        }
    }

    pub fn set_size(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes after a failure are dropped; the first error is returned by `flush`.
    fn emit(&mut self, data: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(data.as_bytes()) {
            self.write_error = Some(err);
        }
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn move_to(&mut self, row: u16, col: u16) {
        let seq = format!("\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1);
        self.emit(&seq);
    }

    fn clear_line(&mut self) {
        self.emit("\x1b[2K");
    }

    fn clear_screen(&mut self) {
        self.emit("\x1b[2J\x1b[H");
    }

    fn save_cursor(&mut self) {
        self.emit("\x1b7");
    }

    fn restore_cursor(&mut self) {
        self.emit("\x1b8");
    }

    fn hide_cursor(&mut self) {
        self.emit("\x1b[?25l");
    }

    fn show_cursor(&mut self) {
        self.emit("\x1b[?25h");
    }

    fn write_styled(&mut self, text: &str, style: Style) {
        if style.is_plain() {
            self.emit(text);
            return;
        }
        let seq = sgr_sequence(style);
        self.emit(&seq);
        self.emit(text);
        self.emit("\x1b[0m");
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn rows(&self) -> u16 {
        self.rows
    }
}
