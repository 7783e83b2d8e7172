//! Fixed-interval step gating

use std::time::Duration;

/// Accumulates elapsed time and hands out whole simulation steps.
///
/// At most `max_steps_per_tick` steps are granted per call; time beyond that
/// stays in the accumulator for later ticks.
#[derive(Debug, Clone)]
pub struct StepClock {
    interval: Duration,
    max_steps_per_tick: u32,
    accumulated: Duration,
}

impl StepClock {
    pub fn new(interval: Duration, max_steps_per_tick: u32) -> Self {
        Self {
            interval,
            max_steps_per_tick,
            accumulated: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many steps are due this tick
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut steps = 0;
        while self.accumulated > self.interval && steps < self.max_steps_per_tick {
            self.accumulated -= self.interval;
            steps += 1;
        }

        if steps == self.max_steps_per_tick && self.accumulated > self.interval {
            log::debug!(
                "step cap reached, {:?} of backlog carried over",
                self.accumulated
            );
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Change the step length; time already accumulated is kept
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn backlog(&self) -> Duration {
        self.accumulated
    }
}
