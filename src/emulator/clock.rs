// Tick clock - Fixed-timestep pacing for emulated frames
//
// Redraws arrive at the host's pace; the machine advances at its own refresh
// rate. The clock converts wall time between redraws into a whole number of
// emulated frames, carrying the remainder forward.

use std::time::{Duration, Instant};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct TickClock {
    tick: Duration,
    max_ticks: u32,
    last: Option<Instant>,
    backlog: Duration,
}

impl TickClock {
    /// Create a clock
    ///
    /// # Arguments
    /// * `tick` - Duration of one emulated frame
    /// * `max_ticks` - Most frames returned by one `advance` call
    pub fn new(tick: Duration, max_ticks: u32) -> Self {
        Self {
            tick: tick.max(Duration::from_micros(1)),
            max_ticks: max_ticks.max(1),
            last: None,
            backlog: Duration::ZERO,
        }
    }

    /// Number of emulated frames due at `now`
    ///
    /// The first call always yields one frame. When more than `max_ticks`
    /// frames are due the excess is dropped instead of replayed.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 1;
        };

        self.backlog += now.saturating_duration_since(last);
        let due = self.backlog.as_nanos() / self.tick.as_nanos();

        if due > u128::from(self.max_ticks) {
            self.backlog = Duration::ZERO;
            return self.max_ticks;
        }

        let due = due as u32;
        self.backlog -= self.tick * due;
        due
    }

    /// Forget accumulated time
    pub fn reset(&mut self) {
        self.last = None;
        self.backlog = Duration::ZERO;
    }

    /// Duration of one emulated frame
    pub fn tick(&self) -> Duration {
        self.tick
    }
}
