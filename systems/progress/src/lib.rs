#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progress driver that steps the completion percentage on a fixed cadence.

use std::time::Duration;

use portfolio_core::{Command, Event};

/// Configuration parameters required to construct the progress driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    tick_interval: Duration,
    increment: f64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and step size.
    #[must_use]
    pub const fn new(tick_interval: Duration, increment: f64) -> Self {
        Self {
            tick_interval,
            increment,
        }
    }

    /// Time between two progress steps.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Percentage points added per step.
    #[must_use]
    pub const fn increment(&self) -> f64 {
        self.increment
    }
}

/// Pure system that emits one progress step per elapsed tick interval.
///
/// The driver stops permanently once it observes saturation or the end of the
/// sequence; the world clamps any step that was already in flight.
#[derive(Debug)]
pub struct ProgressDriver {
    tick_interval: Duration,
    increment: f64,
    accumulator: Duration,
    stopped: bool,
}

impl ProgressDriver {
    /// Creates a new progress driver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            increment: config.increment,
            accumulator: Duration::ZERO,
            stopped: false,
        }
    }

    /// Reports whether the driver has stopped ticking.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consumes events to emit progress commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::ProgressSaturated { .. }
                | Event::SequenceCompleted
                | Event::SequenceTornDown => self.stop(),
                _ => {}
            }
        }

        if self.stopped || self.tick_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        // What remains after each step is how long ago that step fell due.
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            out.push(Command::AdvanceProgress {
                increment: self.increment,
                overdue: self.accumulator,
            });
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.accumulator = Duration::ZERO;
    }
}
