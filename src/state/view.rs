//! Three-pane view state machine with per-pane selection and scroll.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneKind {
    Transcript,
    Document,
    Inspector,
}

impl PaneKind {
    pub const ORDER: [PaneKind; 3] = [PaneKind::Transcript, PaneKind::Document, PaneKind::Inspector];

    fn position(self) -> usize {
        match self {
            Self::Transcript => 0,
            Self::Document => 1,
            Self::Inspector => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Transcript => "Chat",
            Self::Document => "Documents",
            Self::Inspector => "Agents",
        }
    }
}

/// Selection and scroll for one tabbed pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneCursor {
    pub selected: usize,
    pub scroll_offset: usize,
}

/// Snapshot of the active pane, in the shape callers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    Transcript,
    Document { selected: usize, scroll_offset: usize },
    Inspector { selected: usize, scroll_offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    NextPane,
    PreviousPane,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Content bounds of the active pane, recomputed from current content before each input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneBounds {
    pub tab_count: usize,
    pub content_lines: usize,
    pub visible_height: usize,
}

impl PaneBounds {
    pub fn max_scroll(&self) -> usize {
        self.content_lines.saturating_sub(self.visible_height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewChange {
    pub pane_switched: bool,
    pub cursor_moved: bool,
}

impl ViewChange {
    pub fn changed(&self) -> bool {
        self.pane_switched || self.cursor_moved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    active: PaneKind,
    document: PaneCursor,
    inspector: PaneCursor,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            active: PaneKind::Transcript,
            document: PaneCursor::default(),
            inspector: PaneCursor::default(),
        }
    }

    pub fn active(&self) -> PaneKind {
        self.active
    }

    pub fn pane_state(&self) -> PaneState {
        match self.active {
            PaneKind::Transcript => PaneState::Transcript,
            PaneKind::Document => PaneState::Document {
                selected: self.document.selected,
                scroll_offset: self.document.scroll_offset,
            },
            PaneKind::Inspector => PaneState::Inspector {
                selected: self.inspector.selected,
                scroll_offset: self.inspector.scroll_offset,
            },
        }
    }

    pub fn cursor(&self, pane: PaneKind) -> Option<PaneCursor> {
        match pane {
            PaneKind::Transcript => None,
            PaneKind::Document => Some(self.document),
            PaneKind::Inspector => Some(self.inspector),
        }
    }

    fn cursor_mut(&mut self, pane: PaneKind) -> Option<&mut PaneCursor> {
        match pane {
            PaneKind::Transcript => None,
            PaneKind::Document => Some(&mut self.document),
            PaneKind::Inspector => Some(&mut self.inspector),
        }
    }

    /// Switch to `pane`, resetting its scroll to the top.
    pub fn switch_to(&mut self, pane: PaneKind) -> bool {
        if let Some(cursor) = self.cursor_mut(pane) {
            cursor.scroll_offset = 0;
        }
        let switched = self.active != pane;
        self.active = pane;
        switched
    }

    /// Clamp a requested scroll offset into `[0, bounds.max_scroll()]`.
    pub fn set_scroll(&mut self, offset: isize, bounds: PaneBounds) -> bool {
        let active = self.active;
        let Some(cursor) = self.cursor_mut(active) else {
            return false;
        };
        let clamped = offset.clamp(0, bounds.max_scroll() as isize) as usize;
        let moved = cursor.scroll_offset != clamped;
        cursor.scroll_offset = clamped;
        moved
    }

    /// Apply one navigation input. `bounds` describes the active pane's current content;
    /// pane switches ignore it.
    pub fn apply(&mut self, key: NavKey, bounds: PaneBounds) -> ViewChange {
        match key {
            NavKey::NextPane => {
                let next = self.active.next();
                self.switch_to(next);
                return ViewChange {
                    pane_switched: true,
                    cursor_moved: false,
                };
            }
            NavKey::PreviousPane => {
                let previous = self.active.previous();
                self.switch_to(previous);
                return ViewChange {
                    pane_switched: true,
                    cursor_moved: false,
                };
            }
            _ => {}
        }

        let active = self.active;
        let Some(cursor) = self.cursor_mut(active) else {
            return ViewChange::default();
        };
        let before = *cursor;

        // Content may have shrunk since the last input.
        if bounds.tab_count == 0 {
            cursor.selected = 0;
        } else if cursor.selected >= bounds.tab_count {
            cursor.selected = bounds.tab_count - 1;
        }
        cursor.scroll_offset = cursor.scroll_offset.min(bounds.max_scroll());

        let page = bounds.visible_height.max(1);
        match key {
            NavKey::Left if bounds.tab_count > 0 => {
                cursor.selected = (cursor.selected + bounds.tab_count - 1) % bounds.tab_count;
                cursor.scroll_offset = 0;
            }
            NavKey::Right if bounds.tab_count > 0 => {
                cursor.selected = (cursor.selected + 1) % bounds.tab_count;
                cursor.scroll_offset = 0;
            }
            NavKey::Up => cursor.scroll_offset = cursor.scroll_offset.saturating_sub(1),
            NavKey::Down => {
                cursor.scroll_offset = (cursor.scroll_offset + 1).min(bounds.max_scroll())
            }
            NavKey::PageUp => cursor.scroll_offset = cursor.scroll_offset.saturating_sub(page),
            NavKey::PageDown => {
                cursor.scroll_offset = (cursor.scroll_offset + page).min(bounds.max_scroll())
            }
            NavKey::Home => cursor.scroll_offset = 0,
            NavKey::End => cursor.scroll_offset = bounds.max_scroll(),
            _ => {}
        }

        ViewChange {
            pane_switched: false,
            cursor_moved: *cursor != before,
        }
    }
}
