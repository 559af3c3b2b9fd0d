//! Bounded transcript buffer and the "fit remaining rows, trim oldest" layout.

use serde::{Deserialize, Serialize};

use crate::core::text::markup::parse;
use crate::core::text::utils::truncate_to_width;
use crate::core::text::wrap::{wrap, WrappedLine};
use crate::core::text::width::WidthOracle;

pub const SYSTEM_SPEAKER: &str = "System";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Normal,
    /// Collapsed to one truncated line (tool-call summaries and the like).
    Action,
}

/// Stable identity of an entry; survives trimming of older entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub speaker: String,
    pub body: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
pub struct TranscriptBuffer {
    entries: Vec<TranscriptEntry>,
    capacity: usize,
    next_id: u64,
}

impl TranscriptBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Append an entry, dropping the oldest ones beyond capacity.
    pub fn push(
        &mut self,
        speaker: impl Into<String>,
        body: impl Into<String>,
        kind: EntryKind,
    ) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            speaker: speaker.into(),
            body: body.into(),
            kind,
        });

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        id
    }

    pub fn push_system(&mut self, body: impl Into<String>) -> EntryId {
        self.push(SYSTEM_SPEAKER, body, EntryKind::Normal)
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.position(id).map(|index| &self.entries[index])
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut TranscriptEntry> {
        self.position(id).map(move |index| &mut self.entries[index])
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

pub fn name_prefix(speaker: &str) -> String {
    format!("{speaker}: ")
}

/// Text budget for a Normal entry: one column is kept free at the right edge.
pub fn max_text_width(terminal_width: usize, name_width: usize) -> usize {
    terminal_width.saturating_sub(name_width + 1).max(1)
}

/// Column budget for transcript rows at one terminal width.
///
/// Rows never reach the last column: the name prefix is capped so that prefix plus text
/// always fits in `terminal_width - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBudget {
    terminal_width: usize,
}

impl RowBudget {
    pub fn new(terminal_width: usize) -> Self {
        Self { terminal_width }
    }

    pub fn terminal_width(&self) -> usize {
        self.terminal_width
    }

    /// Widest name prefix a row may carry: half the terminal, and never so wide that no text
    /// column is left.
    pub fn prefix_limit(&self) -> usize {
        (self.terminal_width / 2).min(self.terminal_width.saturating_sub(2))
    }

    /// `"{speaker}: "`, with the speaker shortened when the prefix would exceed the limit.
    pub fn prefix(&self, speaker: &str, oracle: &dyn WidthOracle) -> String {
        let full = name_prefix(speaker);
        let limit = self.prefix_limit();
        if oracle.text_width(&full) <= limit {
            return full;
        }
        let separator = oracle.text_width(&name_prefix(""));
        let name = truncate_to_width(speaker, limit.saturating_sub(separator), "...", oracle);
        truncate_to_width(&name_prefix(&name), limit, "", oracle)
    }

    pub fn max_text_width(&self, name_width: usize) -> usize {
        max_text_width(self.terminal_width, name_width)
    }
}

/// Wrapped shape of a Normal entry. Line 0 carries the name prefix; the rest are indented by
/// `name_width` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLayout {
    pub prefix: String,
    pub name_width: usize,
    pub lines: Vec<WrappedLine>,
}

pub fn layout_entry(
    entry: &TranscriptEntry,
    budget: RowBudget,
    oracle: &dyn WidthOracle,
) -> EntryLayout {
    let prefix = budget.prefix(&entry.speaker, oracle);
    let name_width = oracle.text_width(&prefix);
    let width = budget.max_text_width(name_width);

    let mut lines = Vec::new();
    for sub_line in entry.body.split('\n') {
        lines.extend(wrap(&parse(sub_line), width, oracle));
    }

    EntryLayout {
        prefix,
        name_width,
        lines,
    }
}

pub fn entry_line_count(
    entry: &TranscriptEntry,
    budget: RowBudget,
    oracle: &dyn WidthOracle,
) -> usize {
    match entry.kind {
        EntryKind::Action => 1,
        EntryKind::Normal => layout_entry(entry, budget, oracle).lines.len().max(1),
    }
}

/// The trailing window of entries that fits the message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleWindow {
    /// Index of the first drawn entry.
    pub start: usize,
    /// Line count of each drawn entry, in order.
    pub line_counts: Vec<usize>,
}

impl VisibleWindow {
    pub fn total_lines(&self) -> usize {
        self.line_counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.line_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_counts.is_empty()
    }
}

/// Pick the maximal suffix of `entries` whose line counts fit in `available_rows`.
///
/// Whole entries are dropped from the front; the most recent entry is always kept, even when
/// it alone is taller than the area.
pub fn select_visible(
    entries: &[TranscriptEntry],
    available_rows: usize,
    budget: RowBudget,
    oracle: &dyn WidthOracle,
) -> VisibleWindow {
    let mut start = entries.len();
    let mut used = 0;
    let mut line_counts = Vec::new();

    for entry in entries.iter().rev() {
        let count = entry_line_count(entry, budget, oracle);
        if !line_counts.is_empty() && used + count > available_rows {
            break;
        }
        used += count;
        line_counts.push(count);
        start -= 1;
    }

    line_counts.reverse();
    VisibleWindow { start, line_counts }
}
