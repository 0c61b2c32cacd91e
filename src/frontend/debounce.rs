//! Quiet-period debouncer for cell edits
//!
//! Holds at most one pending value. Scheduling a new value restarts the quiet
//! period; the value becomes due once no new value arrived for `delay`.
//! Time is passed in explicitly so the UI can drive it from the frame clock
//! and tests can drive it by hand.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet period
    ///
    /// Returns the value that was displaced, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending
            .replace((value, now + self.delay))
            .map(|(old, _)| old)
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Take the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Time left until the pending value is due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, due)| due.saturating_duration_since(now))
    }
}
