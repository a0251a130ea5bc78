//! Search session — the shared state container and interaction controller
//! behind the search panel.
//!
//! [`SearchSession`] is created once at startup and passed explicitly to the
//! UI layer; there is no ambient singleton. It owns the query text, the panel
//! visibility, the result list, and the [`Debouncer`] that coalesces
//! keystrokes into a single trailing lookup.
//!
//! # Lookup lifecycle
//!
//! ```text
//! set_query ──► Debouncer ──► poll_due ──► LookupRequest { seq, query }
//!                                               │  (dispatched by the UI)
//!                 apply ◄── LookupOutcome ◄─────┘
//! ```
//!
//! Each dispatched lookup is stamped with a sequence number. [`apply`]
//! discards any outcome whose sequence number is not the in-flight one or
//! whose query no longer matches the current text, so a slow response for an
//! old query can never overwrite results for a newer one.
//!
//! [`apply`]: SearchSession::apply

use crate::debounce::Debouncer;
use crate::types::{Location, LookupStatus};
use std::time::Duration;

/// A due lookup, ready to be dispatched by the caller.
///
/// The session never performs I/O; the UI layer hands the request to the
/// geocoding client on a background task and feeds the [`LookupOutcome`]
/// back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Stamp identifying this dispatch; echoed back in the outcome.
    pub seq: u64,
    /// The query text the lookup was issued for.
    pub query: String,
}

/// Completion of a dispatched lookup.
///
/// Failures carry only a message: the error is absorbed here (logged, status
/// flagged) and never propagates into the rendering path.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Location>, String>,
}

/// Shared search state plus the interaction-controller operations over it.
#[derive(Debug)]
pub struct SearchSession {
    /// Current text typed by the user.
    pub query: String,
    /// Progress of the most recent lookup.
    pub status: LookupStatus,
    /// Results of the last successful lookup. Deliberately *not* cleared on
    /// empty input or on lookup failure.
    pub results: Vec<Location>,
    /// Whether the search panel is visible.
    pub is_open: bool,

    debouncer: Debouncer<String>,
    next_seq: u64,
    /// Sequence number of the one lookup whose outcome we will still accept.
    inflight: Option<u64>,
}

impl SearchSession {
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            query: String::new(),
            status: LookupStatus::Idle,
            results: Vec::new(),
            is_open: false,
            debouncer: Debouncer::new(debounce_delay),
            next_seq: 0,
            inflight: None,
        }
    }

    /// Update the query text from a keystroke.
    ///
    /// The text is echoed into state synchronously. Non-empty text
    /// (re)schedules the debounced lookup; empty text schedules nothing and
    /// cancels any pending debounce, leaving the existing results untouched.
    /// Either way, any lookup already in flight is disowned — its outcome
    /// would be stale.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        self.disown_inflight();

        if self.query.is_empty() {
            self.debouncer.cancel();
            self.status = LookupStatus::Idle;
            tracing::debug!("search: query emptied, pending lookup cancelled");
        } else {
            self.debouncer.schedule(self.query.clone());
            tracing::debug!(query = %self.query, "search: lookup rescheduled");
        }
    }

    /// Drain the debouncer. When the quiet window has elapsed, stamp the
    /// lookup, mark the session pending, and return the request for the
    /// caller to dispatch. Call once per UI tick.
    pub fn poll_due(&mut self) -> Option<LookupRequest> {
        let query = self.debouncer.poll_ready()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inflight = Some(seq);
        self.status = LookupStatus::Pending;
        tracing::debug!(seq, query = %query, "search: lookup dispatched");
        Some(LookupRequest { seq, query })
    }

    /// Feed a completed lookup back into the session.
    ///
    /// Outcomes are discarded unless the sequence number matches the
    /// in-flight lookup *and* the query still matches the current text. On
    /// success the results are replaced; on failure the status flips to
    /// [`LookupStatus::Error`] and the prior results stay visible.
    pub fn apply(&mut self, outcome: LookupOutcome) {
        if self.inflight != Some(outcome.seq) || outcome.query != self.query {
            tracing::debug!(
                seq = outcome.seq,
                query = %outcome.query,
                current = %self.query,
                "search: stale lookup outcome discarded"
            );
            return;
        }
        self.inflight = None;

        match outcome.result {
            Ok(results) => {
                tracing::debug!(seq = outcome.seq, count = results.len(), "search: lookup succeeded");
                self.results = results;
                self.status = LookupStatus::Success;
            }
            Err(message) => {
                tracing::warn!(seq = outcome.seq, %message, "search: lookup failed");
                self.status = LookupStatus::Error;
            }
        }
    }

    /// Open the search panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the search panel. Query and results are left as-is.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Flip the panel visibility.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Escape key: close the panel when open; no-op when already closed.
    /// Returns whether anything changed.
    pub fn on_escape(&mut self) -> bool {
        if self.is_open {
            tracing::debug!("search: panel closed (escape)");
            self.is_open = false;
            true
        } else {
            false
        }
    }

    /// Select the result at `index`: closes the panel and returns a clone of
    /// the location. Query and results are left untouched.
    pub fn select(&mut self, index: usize) -> Option<Location> {
        let location = self.results.get(index).cloned()?;
        tracing::debug!(index, location = %location, "search: result selected");
        self.is_open = false;
        Some(location)
    }

    /// Teardown hook: cancel the debounce timer and disown any in-flight
    /// lookup so nothing fires after the owner is gone.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
        self.disown_inflight();
    }

    /// Whether a lookup is scheduled but has not yet fired.
    pub fn lookup_scheduled(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Drop the claim on the in-flight lookup. A pending status without an
    /// outstanding current-query lookup would be a lie, so reset it.
    fn disown_inflight(&mut self) {
        if self.inflight.take().is_some() && self.status == LookupStatus::Pending {
            self.status = LookupStatus::Idle;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const DELAY: Duration = Duration::from_millis(1000);

    fn location(name: &str, lat: f64, lon: f64) -> Location {
        Location {
            name: name.to_string(),
            state: None,
            country: "GB".to_string(),
            lat,
            lon,
        }
    }

    /// Drive a session to the point where one lookup has been dispatched.
    async fn dispatch(session: &mut SearchSession, query: &str) -> LookupRequest {
        session.set_query(query);
        advance(DELAY).await;
        session.poll_due().expect("lookup should be due")
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_yields_one_lookup_for_last_text() {
        let mut s = SearchSession::new(DELAY);

        s.set_query("Lon");
        advance(Duration::from_millis(50)).await;
        s.set_query("Londo");
        advance(Duration::from_millis(70)).await;
        s.set_query("London");

        // Quiet window not yet elapsed.
        advance(Duration::from_millis(999)).await;
        assert_eq!(s.poll_due(), None);

        advance(Duration::from_millis(1)).await;
        let req = s.poll_due().expect("one lookup due");
        assert_eq!(req.query, "London");
        assert_eq!(s.status, LookupStatus::Pending);

        // And only one.
        assert_eq!(s.poll_due(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_query_triggers_nothing_and_keeps_results() {
        let mut s = SearchSession::new(DELAY);
        s.results = vec![location("London", 51.5, -0.12)];

        s.set_query("");
        advance(DELAY).await;
        assert_eq!(s.poll_due(), None);
        assert_eq!(s.results.len(), 1);
        assert_eq!(s.status, LookupStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn emptying_query_cancels_scheduled_lookup() {
        let mut s = SearchSession::new(DELAY);
        s.set_query("L");
        assert!(s.lookup_scheduled());

        s.set_query("");
        assert!(!s.lookup_scheduled());
        advance(DELAY).await;
        assert_eq!(s.poll_due(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_outcome_replaces_results() {
        let mut s = SearchSession::new(DELAY);
        let req = dispatch(&mut s, "London").await;

        s.apply(LookupOutcome {
            seq: req.seq,
            query: req.query,
            result: Ok(vec![location("London", 51.5, -0.12)]),
        });

        assert_eq!(s.status, LookupStatus::Success);
        assert_eq!(s.results.len(), 1);
        assert_eq!(s.results[0].weather_route(), "/weather?lat=51.5&lon=-0.12");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_outcome_keeps_prior_results() {
        let mut s = SearchSession::new(DELAY);
        s.results = vec![location("London", 51.5, -0.12)];
        let req = dispatch(&mut s, "Paris").await;

        s.apply(LookupOutcome {
            seq: req.seq,
            query: req.query,
            result: Err("connection refused".to_string()),
        });

        assert_eq!(s.status, LookupStatus::Error);
        assert_eq!(s.results[0].name, "London");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_outcome_for_older_seq_is_discarded() {
        let mut s = SearchSession::new(DELAY);
        let old = dispatch(&mut s, "Lon").await;
        let new = dispatch(&mut s, "London").await;
        assert!(new.seq > old.seq);

        // Fresh response lands first…
        s.apply(LookupOutcome {
            seq: new.seq,
            query: new.query,
            result: Ok(vec![location("London", 51.5, -0.12)]),
        });
        // …then the slow response for the old query arrives late.
        s.apply(LookupOutcome {
            seq: old.seq,
            query: old.query,
            result: Ok(vec![location("Lonavala", 18.75, 73.4)]),
        });

        assert_eq!(s.results[0].name, "London");
        assert_eq!(s.status, LookupStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn outcome_for_changed_query_is_discarded() {
        let mut s = SearchSession::new(DELAY);
        let req = dispatch(&mut s, "Paris").await;

        // Query emptied while the lookup is in flight.
        s.set_query("");
        s.apply(LookupOutcome {
            seq: req.seq,
            query: req.query,
            result: Ok(vec![location("Paris", 48.85, 2.35)]),
        });

        assert!(s.results.is_empty());
        assert_eq!(s.status, LookupStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn escape_closes_open_panel_and_is_noop_when_closed() {
        let mut s = SearchSession::new(DELAY);
        s.open();
        assert!(s.on_escape());
        assert!(!s.is_open);

        assert!(!s.on_escape());
        assert!(!s.is_open);
    }

    #[tokio::test(start_paused = true)]
    async fn select_closes_panel_and_preserves_state() {
        let mut s = SearchSession::new(DELAY);
        s.query = "London".to_string();
        s.results = vec![location("London", 51.5, -0.12)];
        s.open();

        let picked = s.select(0).expect("index 0 exists");
        assert_eq!(picked.name, "London");
        assert!(!s.is_open);
        assert_eq!(s.query, "London");
        assert_eq!(s.results.len(), 1);

        assert_eq!(s.select(5), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_pending_resets_pending_status() {
        let mut s = SearchSession::new(DELAY);
        let _req = dispatch(&mut s, "London").await;
        assert_eq!(s.status, LookupStatus::Pending);

        s.cancel_pending();
        assert_eq!(s.status, LookupStatus::Idle);
        assert!(!s.lookup_scheduled());
    }
}
