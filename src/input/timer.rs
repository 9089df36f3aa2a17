// Release timer - One-shot deadline rearmed in place
//
// The timer is never torn down while buttons are held: each press moves the
// deadline forward, and firing disarms it until the next press.

use std::time::{Duration, Instant};

/// One-shot timer with a fixed period
#[derive(Debug, Clone)]
pub struct ReleaseTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl ReleaseTimer {
    /// Create a timer armed to fire one period after `now`
    pub fn armed(period: Duration, now: Instant) -> Self {
        Self {
            period,
            deadline: Some(now + period),
        }
    }

    /// Move the deadline to one period after `now`
    pub fn reset(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    /// Fire the timer if its deadline has passed
    ///
    /// Returns `true` exactly once per arming.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Pending deadline, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the timer will fire
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Configured period
    pub fn period(&self) -> Duration {
        self.period
    }
}
