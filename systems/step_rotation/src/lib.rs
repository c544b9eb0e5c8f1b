#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Status label rotator that cycles the splash caption on its own cadence.

use std::time::Duration;

use portfolio_core::{Command, Event};

/// Configuration parameters required to construct the step rotator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided rotation cadence.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Time between two label rotations.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

/// Pure system that requests a label rotation per elapsed interval.
///
/// Rotation is independent of progress and only ends with the sequence itself.
#[derive(Debug)]
pub struct StepRotation {
    tick_interval: Duration,
    accumulator: Duration,
    cancelled: bool,
}

impl StepRotation {
    /// Creates a new step rotator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
            cancelled: false,
        }
    }

    /// Reports whether the rotator was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Consumes events to emit rotation commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::SequenceCompleted | Event::SequenceTornDown => {
                    self.cancelled = true;
                    self.accumulator = Duration::ZERO;
                }
                _ => {}
            }
        }

        if self.cancelled || self.tick_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            out.push(Command::RotateStep);
        }
    }
}
