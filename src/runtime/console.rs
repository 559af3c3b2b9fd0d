//! Console runtime: owns the terminal, the state and the timers, and applies handler results.
//!
//! Everything runs on the caller's thread. Inputs arrive through [`ConsoleRuntime::run`] (or
//! the individual `handle_*` methods), strictly in order; timers are deadlines checked between
//! inputs.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::core::output::OutputGate;
use crate::core::terminal::Terminal;
use crate::core::text::width::{UnicodeWidth, WidthOracle};
use crate::error::{ConsoleError, Result};
use crate::render::layout::Geometry;
use crate::render::renderer::ScreenRenderer;
use crate::render::status::dot_count;
use crate::runtime::dispatch::{dispatch, handle_key, DispatchContext};
use crate::runtime::event::{ConsoleEvent, ConsoleInput, InputKey};
use crate::runtime::host::{CostTable, NoCostTable, Orchestrator, PendingWork, SubmitRequest};
use crate::runtime::scheduler::{DrawPlan, Redraw, RedrawScheduler};
use crate::state::ConsoleState;

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

pub struct ConsoleRuntime<T: Terminal> {
    terminal: T,
    output: OutputGate,
    orchestrator: Box<dyn Orchestrator>,
    costs: Box<dyn CostTable>,
    oracle: Box<dyn WidthOracle>,
    state: ConsoleState,
    scheduler: RedrawScheduler,
    geometry: Geometry,
    config: ConsoleConfig,
    running: bool,
}

impl<T: Terminal> ConsoleRuntime<T> {
    pub fn new(terminal: T, orchestrator: Box<dyn Orchestrator>, config: ConsoleConfig) -> Self {
        let geometry = Geometry::new(
            usize::from(terminal.columns()),
            usize::from(terminal.rows()),
        );
        Self {
            terminal,
            output: OutputGate::new(),
            orchestrator,
            costs: Box::new(NoCostTable),
            oracle: Box::new(UnicodeWidth),
            state: ConsoleState::new(config.transcript_capacity),
            scheduler: RedrawScheduler::new(config.redraw_interval, config.status_tick),
            geometry,
            config,
            running: true,
        }
    }

    pub fn with_cost_table(mut self, costs: Box<dyn CostTable>) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_width_oracle(mut self, oracle: Box<dyn WidthOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Paint the initial screen.
    pub fn start(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.apply(&[Redraw::Full], Instant::now())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.running {
            return None;
        }
        self.scheduler.next_deadline()
    }

    pub fn handle_input(&mut self, input: ConsoleInput, now: Instant) -> Result<()> {
        match input {
            ConsoleInput::Event(event) => self.handle_event(event, now),
            ConsoleInput::Key(key) => self.handle_key(key, now),
            ConsoleInput::Resize { columns, rows } => self.handle_resize(columns, rows, now),
            ConsoleInput::Shutdown => {
                self.shutdown();
                Ok(())
            }
        }
    }

    pub fn handle_event(&mut self, event: ConsoleEvent, now: Instant) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let ctx = DispatchContext {
            now,
            costs: self.costs.as_ref(),
        };
        let redraws = dispatch(&mut self.state, event, &ctx);
        self.apply(&redraws, now)
    }

    pub fn handle_key(&mut self, key: InputKey, now: Instant) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let outcome = handle_key(&mut self.state, key, self.geometry, self.oracle.as_ref());
        if let Some(text) = outcome.submit {
            self.submit(text);
        }
        self.apply(&outcome.redraws, now)?;
        if outcome.quit {
            self.shutdown();
        }
        Ok(())
    }

    pub fn handle_resize(&mut self, columns: u16, rows: u16, now: Instant) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.geometry = Geometry::new(usize::from(columns), usize::from(rows));
        debug!(columns, rows, "resize");
        self.apply(&[Redraw::Full], now)
    }

    /// Fire due timers and expire a stale thinking indicator.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let mut redraws = Vec::new();
        if let Some(timeout) = self.config.thinking_timeout {
            if self.state.status.expire_thinking(now, timeout) {
                debug!("thinking indicator timed out");
                redraws.push(Redraw::Status);
            }
        }
        if !redraws.is_empty() {
            self.apply(&redraws, now)?;
        }

        let plan = self
            .scheduler
            .poll(now, self.state.status.has_indicator());
        self.draw(plan)
    }

    /// Process inputs until shutdown or until every sender is gone.
    pub fn run(&mut self, inputs: &Receiver<ConsoleInput>) -> Result<()> {
        self.start()?;
        while self.running {
            let received = match self.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    inputs.recv_timeout(wait)
                }
                None => inputs.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(input) => self.handle_input(input, Instant::now())?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("input channel closed");
                    self.shutdown();
                }
            }
            self.tick(Instant::now())?;
        }
        Ok(())
    }

    /// Stop accepting work. Every handler is a no-op afterwards.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scheduler.cancel_all();
        info!("console shutting down");
    }

    /// Wait for in-flight external work to finish, bounded by the configured timeout.
    ///
    /// Returns false when the bound elapsed with work still pending.
    pub fn drain_pending(&self, pending: &dyn PendingWork) -> bool {
        let started = Instant::now();
        loop {
            let count = pending.pending_count();
            if count == 0 {
                return true;
            }
            if started.elapsed() >= self.config.shutdown_timeout {
                warn!(pending = count, "gave up waiting for pending work");
                return false;
            }
            debug!(pending = count, "waiting for pending work");
            let remaining = self
                .config
                .shutdown_timeout
                .saturating_sub(started.elapsed());
            thread::sleep(self.config.shutdown_poll.min(remaining).max(Duration::from_millis(1)));
        }
    }

    fn submit(&mut self, text: String) {
        let identity = &self.config.identity;
        let request = SubmitRequest {
            location_id: identity.location_id.clone(),
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            text,
        };
        debug!(chars = request.text.chars().count(), "submitting user message");
        self.orchestrator.submit_user_message(request);
        self.orchestrator
            .pause_updates_until(SystemTime::now() + self.config.pause_after_submit);
    }

    fn apply(&mut self, redraws: &[Redraw], now: Instant) -> Result<()> {
        let plan = self.scheduler.submit(redraws, now);
        self.scheduler
            .sync_status_tick(self.state.status.has_indicator(), now);
        self.draw(plan)
    }

    fn draw(&mut self, plan: DrawPlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let tick_ms =
            u64::try_from(self.scheduler.status_tick_interval().as_millis()).unwrap_or(u64::MAX);
        let dots = dot_count(epoch_millis(), tick_ms);
        let renderer = ScreenRenderer::new(&self.state, self.geometry, self.oracle.as_ref(), dots);

        if plan.full {
            self.output.extend(renderer.full_cmds());
        } else {
            if plan.content {
                self.output.extend(renderer.content_cmds());
            }
            if plan.status {
                self.output.extend(renderer.status_cmds());
            }
            if plan.input {
                self.output.extend(renderer.input_cmds());
            }
        }
        self.output
            .flush(&mut self.terminal)
            .map_err(|source| ConsoleError::io("flushing terminal output", source))
    }
}
