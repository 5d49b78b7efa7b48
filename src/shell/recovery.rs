//! Deferred, cancellable auto-clear after a faulted computation.
//!
//! The timer holds a deadline and nothing else; the caller supplies the
//! clock, so firing is deterministic under test.

use chrono::{DateTime, Duration, Utc};
use tracing::{trace, warn};

/// One-shot timer that fires at most once per `schedule`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryTimer {
    delay: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl RecoveryTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer relative to `now`.
    ///
    /// Returns `None` and leaves the timer disarmed when the deadline is not
    /// representable.
    pub fn schedule(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.deadline = now.checked_add_signed(self.delay);
        match self.deadline {
            Some(deadline) => trace!(%deadline, "recovery scheduled"),
            None => warn!(delay = %self.delay, "recovery deadline out of range; not armed"),
        }
        self.deadline
    }

    /// Disarm the timer. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.deadline.take().is_some();
        if was_armed {
            trace!("recovery cancelled");
        }
        was_armed
    }

    /// Fire if the deadline has passed. Disarms on firing.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
