//! Fixed-period scheduling on simulation time.

use ts_core::SimTime;

/// Slack for float drift when comparing accumulated sim time to a deadline.
const TIME_EPS_S: f64 = 1e-9;

/// Fires once per `period_s` of simulation time, starting at time zero.
///
/// Missed periods collapse into a single firing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicTimer {
    period_s: f64,
    next_due: SimTime,
}

impl PeriodicTimer {
    pub fn new(period_s: f64) -> Self {
        Self { period_s, next_due: SimTime::ZERO }
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }

    pub fn next_due(&self) -> SimTime {
        self.next_due
    }

    /// `true` if the timer is due at `now`.  Moves the deadline past `now`.
    pub fn poll(&mut self, now: SimTime) -> bool {
        if now.secs() + TIME_EPS_S < self.next_due.secs() {
            return false;
        }
        let behind = ((now.secs() - self.next_due.secs() + TIME_EPS_S) / self.period_s).floor();
        self.next_due = self.next_due.offset((behind.max(0.0) + 1.0) * self.period_s);
        true
    }

    /// Make the timer due at `now`.
    pub fn reset(&mut self, now: SimTime) {
        self.next_due = now;
    }
}
