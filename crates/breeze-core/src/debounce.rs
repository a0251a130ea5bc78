//! Trailing-edge debouncer — coalesces rapid repeated triggers into one
//! delayed value.
//!
//! [`Debouncer::schedule`] replaces any pending value and restarts the delay
//! window; [`Debouncer::poll_ready`] hands the value out exactly once, after
//! the delay has elapsed since the *last* schedule. The UI tick loop polls it
//! every frame, so no background timer task is needed and teardown is a plain
//! [`Debouncer::cancel`] (or just dropping the value).
//!
//! Time is measured with [`tokio::time::Instant`] so tests run deterministically
//! under `tokio::time::pause()`.

use std::time::Duration;
use tokio::time::Instant;

/// Trailing-edge debouncer over a single pending value of type `T`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Replace any pending value with `value` and restart the delay window.
    pub fn schedule(&mut self, value: T) {
        let deadline = Instant::now() + self.delay;
        self.pending = Some((value, deadline));
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "debounce: (re)scheduled");
    }

    /// Take the pending value if its delay window has elapsed.
    ///
    /// Returns the value at most once per scheduled burst; subsequent calls
    /// return `None` until the next [`schedule`](Self::schedule).
    pub fn poll_ready(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= Instant::now() => {
                let (value, _) = self.pending.take()?;
                tracing::debug!("debounce: fired");
                Some(value)
            }
            _ => None,
        }
    }

    /// Drop the pending value without firing. Safe to call when nothing is
    /// pending.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("debounce: cancelled");
        }
    }

    /// Whether a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time remaining until the pending value fires. `Duration::ZERO` when
    /// the window has already elapsed, `None` when nothing is pending.
    pub fn time_until_ready(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(Instant::now()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
