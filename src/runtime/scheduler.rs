//! Redraw scheduling.
//!
//! Handlers return `Redraw` requests; the scheduler decides what is drawn now and what waits.
//! Full redraws are immediate and subsume a pending content redraw. Content redraws coalesce
//! into one per interval. Status and input redraws are cheap single-row repaints and are drawn
//! immediately; the status tick keeps the indicator dots moving while an indicator is active.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::runtime::coalesce::Coalescer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Clear the screen and repaint everything.
    Full,
    /// Repaint the message area; coalesced.
    Content,
    Status,
    Input,
}

/// What should be drawn right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawPlan {
    pub full: bool,
    pub content: bool,
    pub status: bool,
    pub input: bool,
}

impl DrawPlan {
    pub fn is_empty(&self) -> bool {
        !(self.full || self.content || self.status || self.input)
    }

    fn add(&mut self, redraw: Redraw) {
        match redraw {
            Redraw::Full => self.full = true,
            Redraw::Content => self.content = true,
            Redraw::Status => self.status = true,
            Redraw::Input => self.input = true,
        }
    }

    /// A full redraw already covers every partial.
    fn normalize(mut self) -> Self {
        if self.full {
            self.content = false;
            self.status = false;
            self.input = false;
        }
        self
    }
}

#[derive(Debug)]
pub struct RedrawScheduler {
    content: Coalescer,
    status_tick: Coalescer,
}

impl RedrawScheduler {
    pub fn new(redraw_interval: Duration, status_tick: Duration) -> Self {
        Self {
            content: Coalescer::new(redraw_interval),
            status_tick: Coalescer::new(status_tick),
        }
    }

    /// Fold `requests` into what must be drawn immediately.
    pub fn submit(&mut self, requests: &[Redraw], now: Instant) -> DrawPlan {
        let mut plan = DrawPlan::default();
        for redraw in requests {
            match redraw {
                Redraw::Content => {
                    if self.content.request(now) {
                        trace!("content redraw scheduled");
                    }
                }
                other => plan.add(*other),
            }
        }
        if plan.full && self.content.cancel() {
            trace!("pending content redraw subsumed by full redraw");
        }
        plan.normalize()
    }

    /// Keep the status tick armed while `indicator_active`, and disarm it otherwise.
    pub fn sync_status_tick(&mut self, indicator_active: bool, now: Instant) {
        if indicator_active {
            self.status_tick.request(now);
        } else {
            self.status_tick.cancel();
        }
    }

    /// Fire whichever timers are due. A fired status tick re-arms itself while
    /// `indicator_active`.
    pub fn poll(&mut self, now: Instant, indicator_active: bool) -> DrawPlan {
        let mut plan = DrawPlan::default();
        if self.content.poll(now) {
            plan.content = true;
        }
        if self.status_tick.poll(now) {
            plan.status = true;
            if indicator_active {
                self.status_tick.request(now);
            }
        }
        plan
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.content.deadline(), self.status_tick.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn content_pending(&self) -> bool {
        self.content.is_pending()
    }

    pub fn status_tick_armed(&self) -> bool {
        self.status_tick.is_pending()
    }

    pub fn status_tick_interval(&self) -> Duration {
        self.status_tick.interval()
    }

    pub fn cancel_all(&mut self) {
        self.content.cancel();
        self.status_tick.cancel();
    }
}
