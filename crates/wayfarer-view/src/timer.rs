//! Settle-timer abstraction.
//!
//! Layout transitions (panel open/close animations) may still be running when
//! a size-change event fires, so the controller does an immediate best-effort
//! pass and schedules a confirmatory pass for after the transition settles.
//! The deferred pass is a plain cancelable callback, not a thread: hosts wire
//! `schedule` to whatever timer facility they have and call
//! `ViewportController::settle_elapsed` when it fires.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifies one scheduled settle pass. Tokens are never reused within a
/// controller's lifetime.
pub type TimerToken = u64;

pub trait SettleScheduler {
    /// Requests `ViewportController::settle_elapsed(token)` after `delay_ms`.
    fn schedule(&mut self, token: TimerToken, delay_ms: u64);

    /// Cancels a previously scheduled token. Canceling an unknown or already
    /// fired token is a no-op; a fire that slips through is harmless because
    /// the settle pass recomputes from current state.
    fn cancel(&mut self, token: TimerToken);
}

/// Scheduler for hosts without deferred execution: the confirmatory pass is
/// simply skipped and only the immediate pass runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl SettleScheduler for NoopScheduler {
    fn schedule(&mut self, _token: TimerToken, _delay_ms: u64) {}
    fn cancel(&mut self, _token: TimerToken) {}
}

/// Deterministic scheduler for tests and synchronous hosts: records pending
/// timers so the caller can fire them explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Vec<(TimerToken, u64)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[(TimerToken, u64)] {
        &self.pending
    }

    /// Drains every pending token, oldest first.
    pub fn take_pending(&mut self) -> Vec<TimerToken> {
        self.pending.drain(..).map(|(token, _)| token).collect()
    }
}

impl SettleScheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, delay_ms: u64) {
        self.pending.push((token, delay_ms));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(t, _)| *t != token);
    }
}

// The controller takes its scheduler by value; a shared handle lets tests
// keep firing rights on the same scheduler.
impl<S: SettleScheduler> SettleScheduler for Rc<RefCell<S>> {
    fn schedule(&mut self, token: TimerToken, delay_ms: u64) {
        self.borrow_mut().schedule(token, delay_ms);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.borrow_mut().cancel(token);
    }
}
