//! Per-class timer state.
//!
//! Elapsed time is derived from wall-clock timestamps, never from a ticking
//! counter. Every transition takes the current instant so the type stays pure
//! and can be driven by any clock.
//!
//! ```text
//! Idle --start--> Running --stop/leave--> Stopped --resume--> Running
//!                                          Stopped --save/discard--> Idle
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::timer::core::report::SessionReport;
use crate::shared::core::primitives::ClassId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTimer {
    class_id: ClassId,
    display_name: String,
    /// Committed time, always a whole number of seconds. Only grows, and only
    /// through `save`.
    saved_ms: u64,
    /// Unsaved time accumulated by finished runs.
    session_ms: u64,
    /// Set exactly while Running.
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    state: TimerState,
}

/// Milliseconds from `from` to `to`, 0 when the clock went backwards.
pub(crate) fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_milliseconds()).unwrap_or(0)
}

impl ClassTimer {
    pub fn new(class_id: ClassId, display_name: impl Into<String>) -> Self {
        Self {
            class_id,
            display_name: display_name.into(),
            saved_ms: 0,
            session_ms: 0,
            started_at: None,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn saved_ms(&self) -> u64 {
        self.saved_ms
    }

    pub fn saved_seconds(&self) -> u64 {
        self.saved_ms / 1000
    }

    pub fn session_ms(&self) -> u64 {
        self.session_ms
    }

    /// Unsaved time including the run in progress. Does not mutate.
    pub fn live_elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        match (self.state, self.started_at) {
            (TimerState::Running, Some(started)) => {
                self.session_ms.saturating_add(elapsed_ms(started, now))
            }
            _ => self.session_ms,
        }
    }

    pub fn live_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.live_elapsed_ms(now) / 1000
    }

    // ── Transitions ──────────────────────────────────────────────────
    // Each returns whether the timer changed. Actions that do not apply to
    // the current state leave it untouched.

    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.started_at = Some(now);
        self.state = TimerState::Running;
        true
    }

    /// Also used for the implicit stop when the user leaves a running timer.
    pub fn stop(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.flush(now);
        self.state = TimerState::Stopped;
        true
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != TimerState::Stopped {
            return false;
        }
        self.started_at = Some(now);
        self.state = TimerState::Running;
        true
    }

    /// Commits the session in whole seconds. A running timer is flushed first.
    /// The sub-second remainder is dropped so `saved_ms` always equals the sum of
    /// the reported seconds.
    pub fn save(&mut self, now: DateTime<Utc>) -> Option<SessionReport> {
        match self.state {
            TimerState::Idle => return None,
            TimerState::Running => self.flush(now),
            TimerState::Stopped => {}
        }
        let seconds = self.session_ms / 1000;
        let report = SessionReport {
            class_id: self.class_id,
            seconds,
        };
        self.saved_ms = self.saved_ms.saturating_add(seconds.saturating_mul(1000));
        self.session_ms = 0;
        self.state = TimerState::Idle;
        Some(report)
    }

    /// Drops the unsaved session, including a run in progress.
    pub fn discard(&mut self) -> bool {
        if self.state == TimerState::Idle {
            return false;
        }
        self.session_ms = 0;
        self.started_at = None;
        self.state = TimerState::Idle;
        true
    }

    /// Repairs state that violates the timer invariants, e.g. after loading a
    /// hand-edited snapshot.
    pub(crate) fn normalize(&mut self) {
        match (self.state, self.started_at) {
            (TimerState::Running, None) => self.state = TimerState::Stopped,
            (TimerState::Idle | TimerState::Stopped, Some(_)) => self.started_at = None,
            _ => {}
        }
        if self.state == TimerState::Idle {
            self.session_ms = 0;
        }
    }

    fn flush(&mut self, now: DateTime<Utc>) {
        if let Some(started) = self.started_at.take() {
            self.session_ms = self.session_ms.saturating_add(elapsed_ms(started, now));
        }
    }
}
