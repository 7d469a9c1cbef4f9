//! Fetch lifecycle of a single list screen.
//!
//! Each activation of a screen starts one fetch. The controller moves through
//! `Idle → Loading → (Ready | Failed)` and only ever accepts the result of the
//! most recently started request: every [`FetchLifecycle::begin`] allocates a
//! new sequence number, and [`FetchLifecycle::complete`] drops any result
//! whose number is not the one in flight. Cancelling (screen deactivated)
//! clears the in-flight number so late results are no-ops too.

use crate::domain::error::FetchError;
use chrono::{DateTime, Utc};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Where a fetch stands. Exactly one state at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet, or the screen was deactivated.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Ready {
        items: Vec<T>,
        loaded_at: DateTime<Utc>,
    },
    /// The latest request failed.
    Failed { error: FetchError },
}

/// Fetch controller for one screen instance.
#[derive(Debug, Clone)]
pub struct FetchLifecycle<T> {
    state: FetchState<T>,
    last_seq: u64,
    in_flight: Option<u64>,
}

impl<T> Default for FetchLifecycle<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            last_seq: 0,
            in_flight: None,
        }
    }
}

impl<T> FetchLifecycle<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Sequence number of the request currently in flight, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// The full list of the latest successful fetch, empty otherwise.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match &self.state {
            FetchState::Ready { items, .. } => items,
            FetchState::Idle | FetchState::Loading | FetchState::Failed { .. } => &[],
        }
    }

    /// Starts a new fetch and returns its sequence number.
    ///
    /// Any request still in flight becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        self.state = FetchState::Loading;
        tracing::debug!(seq = self.last_seq, "fetch started");
        self.last_seq
    }

    /// Applies the outcome of request `seq`.
    ///
    /// Returns `false` and leaves the state untouched when `seq` is not the
    /// request in flight.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<T>, FetchError>) -> bool {
        self.complete_at(seq, result, Utc::now())
    }

    /// [`FetchLifecycle::complete`] with an explicit completion time.
    pub fn complete_at(
        &mut self,
        seq: u64,
        result: Result<Vec<T>, FetchError>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, in_flight = ?self.in_flight, "discarding stale fetch result");
            return false;
        }

        self.in_flight = None;
        self.state = match result {
            Ok(items) => {
                tracing::debug!(seq, item_count = items.len(), "fetch ready");
                FetchState::Ready { items, loaded_at: now }
            }
            Err(error) => {
                tracing::debug!(seq, error = %error, "fetch failed");
                FetchState::Failed { error }
            }
        };
        true
    }

    /// Forgets the in-flight request and the payload.
    pub fn cancel(&mut self) {
        if let Some(seq) = self.in_flight.take() {
            tracing::debug!(seq, "fetch cancelled");
        }
        self.state = FetchState::Idle;
    }
}

/// Human-readable age of a snapshot: "just now", "5m ago", "3h ago", "2d ago".
#[must_use]
pub fn age_label(loaded_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - loaded_at).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}
