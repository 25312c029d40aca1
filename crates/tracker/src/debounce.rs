//! Trailing-edge debounce over millisecond timestamps.

use dawdle_model::sample::TimestampMs;

/// Holds at most one pending deadline.
///
/// Every [`schedule`](Self::schedule) replaces the previous deadline, so a
/// burst of arrivals fires once, `window_ms` after the last arrival.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u64,
    deadline_ms: Option<TimestampMs>,
    fired: u64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline_ms: None,
            fired: 0,
        }
    }

    /// Restart the countdown from `now_ms`, discarding any pending one.
    ///
    /// Returns the new deadline.
    pub fn schedule(&mut self, now_ms: TimestampMs) -> TimestampMs {
        let deadline = now_ms.saturating_add(self.window_ms);
        self.deadline_ms = Some(deadline);
        deadline
    }

    /// Check whether the pending countdown has elapsed at `now_ms`.
    /// Returns true and clears the deadline if it has.
    pub fn poll(&mut self, now_ms: TimestampMs) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<TimestampMs> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Quiet window in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// How many times the countdown has elapsed.
    pub fn fire_count(&self) -> u64 {
        self.fired
    }
}
