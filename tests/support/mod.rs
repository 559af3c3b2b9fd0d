#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use chat_console::{
    ConsoleConfig, ConsoleRuntime, Orchestrator, PendingWork, Style, SubmitRequest, Terminal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOp {
    MoveTo(u16, u16),
    ClearLine,
    ClearScreen,
    SaveCursor,
    RestoreCursor,
    HideCursor,
    ShowCursor,
    Text(String, Style),
    Flush,
}

/// Records every terminal call and keeps a character grid of what is on screen.
#[derive(Debug, Default)]
pub struct TerminalTrace {
    pub ops: Vec<TraceOp>,
    pub grid: Vec<Vec<char>>,
    pub cursor: (usize, usize),
    pub saved: Option<(usize, usize)>,
    pub cursor_visible: bool,
}

impl TerminalTrace {
    pub fn row_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn screen(&self) -> Vec<String> {
        (0..self.grid.len()).map(|row| self.row_text(row)).collect()
    }

    pub fn count(&self, op: &TraceOp) -> usize {
        self.ops.iter().filter(|existing| *existing == op).count()
    }

    pub fn flushes(&self) -> usize {
        self.count(&TraceOp::Flush)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    fn clear_row(&mut self, row: usize) {
        if let Some(cells) = self.grid.get_mut(row) {
            cells.iter_mut().for_each(|cell| *cell = ' ');
        }
    }
}

pub struct SharedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
    columns: u16,
    rows: u16,
}

impl SharedTerminal {
    pub fn new(columns: u16, rows: u16) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let trace = TerminalTrace {
            grid: vec![vec![' '; usize::from(columns)]; usize::from(rows)],
            cursor_visible: true,
            ..TerminalTrace::default()
        };
        let state = Arc::new(Mutex::new(trace));
        (
            Self {
                state: Arc::clone(&state),
                columns,
                rows,
            },
            state,
        )
    }
}

impl Terminal for SharedTerminal {
    fn move_to(&mut self, row: u16, col: u16) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::MoveTo(row, col));
        state.cursor = (usize::from(row), usize::from(col));
    }

    fn clear_line(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::ClearLine);
        let row = state.cursor.0;
        state.clear_row(row);
    }

    fn clear_screen(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::ClearScreen);
        for row in 0..state.grid.len() {
            state.clear_row(row);
        }
        state.cursor = (0, 0);
    }

    fn save_cursor(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::SaveCursor);
        state.saved = Some(state.cursor);
    }

    fn restore_cursor(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::RestoreCursor);
        if let Some(saved) = state.saved {
            state.cursor = saved;
        }
    }

    fn hide_cursor(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::HideCursor);
        state.cursor_visible = false;
    }

    fn show_cursor(&mut self) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::ShowCursor);
        state.cursor_visible = true;
    }

    fn write_styled(&mut self, text: &str, style: Style) {
        let mut state = lock_unpoisoned(&self.state);
        state.ops.push(TraceOp::Text(text.to_string(), style));
        let (row, mut col) = state.cursor;
        for ch in text.chars() {
            if let Some(cell) = state.grid.get_mut(row).and_then(|cells| cells.get_mut(col)) {
                *cell = ch;
            }
            col += 1;
        }
        state.cursor = (row, col);
    }

    fn flush(&mut self) -> std::io::Result<()> {
        lock_unpoisoned(&self.state).ops.push(TraceOp::Flush);
        Ok(())
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn rows(&self) -> u16 {
        self.rows
    }
}

#[derive(Debug, Default)]
pub struct OrchestratorTrace {
    pub submits: Vec<SubmitRequest>,
    pub pauses: Vec<SystemTime>,
}

pub struct OrchestratorSpy {
    state: Arc<Mutex<OrchestratorTrace>>,
}

impl OrchestratorSpy {
    pub fn new() -> (Self, Arc<Mutex<OrchestratorTrace>>) {
        let state = Arc::new(Mutex::new(OrchestratorTrace::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Orchestrator for OrchestratorSpy {
    fn submit_user_message(&mut self, request: SubmitRequest) {
        lock_unpoisoned(&self.state).submits.push(request);
    }

    fn pause_updates_until(&mut self, until: SystemTime) {
        lock_unpoisoned(&self.state).pauses.push(until);
    }
}

/// Reports `remaining` pending saves, one fewer on every poll.
pub struct CountdownPending {
    remaining: AtomicUsize,
    pub polls: AtomicUsize,
}

impl CountdownPending {
    pub fn new(remaining: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(remaining),
            polls: AtomicUsize::new(0),
        }
    }
}

impl PendingWork for CountdownPending {
    fn pending_count(&self) -> usize {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let current = self.remaining.load(Ordering::SeqCst);
        if current > 0 {
            self.remaining.store(current - 1, Ordering::SeqCst);
        }
        current
    }
}

/// Always pending.
pub struct StuckPending;

impl PendingWork for StuckPending {
    fn pending_count(&self) -> usize {
        1
    }
}

pub struct Harness {
    pub runtime: ConsoleRuntime<SharedTerminal>,
    pub terminal: Arc<Mutex<TerminalTrace>>,
    pub orchestrator: Arc<Mutex<OrchestratorTrace>>,
}

pub fn harness(columns: u16, rows: u16) -> Harness {
    harness_with(columns, rows, ConsoleConfig::default())
}

pub fn harness_with(columns: u16, rows: u16, config: ConsoleConfig) -> Harness {
    let (terminal, terminal_state) = SharedTerminal::new(columns, rows);
    let (orchestrator, orchestrator_state) = OrchestratorSpy::new();
    let mut runtime = ConsoleRuntime::new(terminal, Box::new(orchestrator), config);
    runtime.start().expect("initial draw");
    Harness {
        runtime,
        terminal: terminal_state,
        orchestrator: orchestrator_state,
    }
}

pub fn screen(state: &Arc<Mutex<TerminalTrace>>) -> Vec<String> {
    lock_unpoisoned(state).screen()
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
