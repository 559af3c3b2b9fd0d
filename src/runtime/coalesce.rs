//! Deadline-based coalescing: the one timer primitive behind both the content redraw and the
//! status tick.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Coalescer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Coalescer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule a firing one interval from `now`. A request while one is pending is absorbed;
    /// returns whether this call scheduled.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + self.interval);
        true
    }

    /// Fire if the deadline has passed. The pending request is consumed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending request; returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
