//! Quiet-period timers for editor input
//!
//! Each [`Debouncer`] restarts on every [`trigger_at`](Debouncer::trigger_at) and
//! fires once when polled after `delay` has passed since the last trigger.

use std::time::{Duration, Instant};

/// Gutter refresh delay
pub const LINE_NUMBERS_DELAY: Duration = Duration::from_millis(100);
/// Metrics bar refresh delay
pub const METRICS_DELAY: Duration = Duration::from_millis(200);
/// Quiet period before an automatic analysis
pub const AUTO_ANALYZE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Restart the quiet period from `now`
    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once per quiet period that has elapsed by `now`
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
