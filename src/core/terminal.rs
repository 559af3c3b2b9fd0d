//! Terminal capability trait and text styles.

/// Named foreground colors the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    /// SGR foreground parameter.
    pub fn sgr(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Blue => "34",
            Self::Magenta => "35",
            Self::Cyan => "36",
            Self::White => "37",
            Self::Gray => "90",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        dim: false,
    };

    pub fn plain() -> Self {
        Self::PLAIN
    }

    pub fn dimmed() -> Self {
        Self {
            dim: true,
            ..Self::PLAIN
        }
    }

    pub fn fg(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

/// Minimal screen capability the console draws through.
///
/// Rows and columns are zero-based. Implementations own escape emission; nothing else in the
/// crate knows about control sequences.
pub trait Terminal {
    fn move_to(&mut self, row: u16, col: u16);

    /// Erase the whole line the cursor is on.
    fn clear_line(&mut self);

    fn clear_screen(&mut self);

    fn save_cursor(&mut self);
    fn restore_cursor(&mut self);
    fn hide_cursor(&mut self);
    fn show_cursor(&mut self);

    /// Write text at the cursor with the given style, leaving the style reset afterwards.
    fn write_styled(&mut self, text: &str, style: Style);

    fn flush(&mut self) -> std::io::Result<()>;

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}
