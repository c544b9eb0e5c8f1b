#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! One-shot completion scheduling.
//!
//! When progress saturates the system waits for the configured grace delay and
//! then requests [`Command::SignalCompletion`] exactly once. The delay is
//! measured from the moment the saturating step fell due, so time already
//! elapsed in the saturating frame counts toward it. Teardown before the delay
//! elapses discards the pending request.

use std::time::Duration;

use portfolio_core::{Command, Event};

/// Configuration parameters required to construct the completion system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grace_delay: Duration,
}

impl Config {
    /// Creates a new configuration using the provided grace delay.
    #[must_use]
    pub const fn new(grace_delay: Duration) -> Self {
        Self { grace_delay }
    }

    /// Pause between saturation and the completion signal.
    #[must_use]
    pub const fn grace_delay(&self) -> Duration {
        self.grace_delay
    }
}

/// Pure system that converts saturation into a delayed completion request.
#[derive(Debug)]
pub struct Completion {
    grace_delay: Duration,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Pending { remaining: Duration },
    Requested,
    Cancelled,
}

impl Completion {
    /// Creates a new completion system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            grace_delay: config.grace_delay,
            state: State::Idle,
        }
    }

    /// Remaining grace delay when a completion is scheduled.
    #[must_use]
    pub fn pending(&self) -> Option<Duration> {
        match self.state {
            State::Pending { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Reports whether the completion request has been emitted.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.state == State::Requested
    }

    /// Reports whether a teardown discarded the schedule.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state == State::Cancelled
    }

    /// Consumes events in order and emits the completion request once due.
    ///
    /// Besides the overdue time carried by the saturation event, only time
    /// observed after that event counts toward the grace delay.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match (event, self.state) {
                (Event::ProgressSaturated { overdue }, State::Idle) => {
                    self.state = State::Pending {
                        remaining: self.grace_delay.saturating_sub(*overdue),
                    };
                }
                (Event::TimeAdvanced { dt }, State::Pending { remaining }) => {
                    self.state = State::Pending {
                        remaining: remaining.saturating_sub(*dt),
                    };
                }
                (Event::SequenceTornDown | Event::SequenceCompleted, State::Idle)
                | (Event::SequenceTornDown | Event::SequenceCompleted, State::Pending { .. }) => {
                    self.state = State::Cancelled;
                }
                _ => {}
            }
        }

        if let State::Pending { remaining } = self.state {
            if remaining.is_zero() {
                self.state = State::Requested;
                out.push(Command::SignalCompletion);
            }
        }
    }
}
