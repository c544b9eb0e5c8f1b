#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative loading sequence state.
//!
//! The world owns every piece of splash state (progress, current label,
//! decorative samples and the lifecycle flag). Each command mutates exactly
//! one of those pieces, and nothing is mutated once the sequence leaves the
//! active state.

use std::time::Duration;

use portfolio_core::{
    Command, Event, Lifecycle, Progress, SampleSet, StepIndex, StepLabels, Termination,
};

/// Represents the authoritative loading sequence state.
#[derive(Debug)]
pub struct World {
    progress: Progress,
    progress_steps: u64,
    progress_saturated: bool,
    step: StepIndex,
    labels: StepLabels,
    samples: SampleSet,
    sample_generation: u64,
    lifecycle: Lifecycle,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates a freshly mounted sequence that rotates through `labels`.
    ///
    /// Progress and the step index both start at zero and the sample set is
    /// empty until the first [`Command::ReplaceSamples`] arrives.
    #[must_use]
    pub fn new(labels: StepLabels) -> Self {
        Self {
            progress: Progress::ZERO,
            progress_steps: 0,
            progress_saturated: false,
            step: StepIndex::default(),
            labels,
            samples: SampleSet::default(),
            sample_generation: 0,
            lifecycle: Lifecycle::Active,
            tick_index: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn terminate(&mut self, termination: Termination) {
        self.lifecycle = Lifecycle::Terminated(termination);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands arriving after the sequence terminated are ignored and produce no
/// events, which makes teardown idempotent and suppresses late completions.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if !world.lifecycle.is_active() {
        return;
    }

    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::AdvanceProgress { increment, overdue } => {
            if world.progress_saturated {
                return;
            }
            debug_assert!(
                increment > 0.0 && increment.is_finite(),
                "progress increment must be positive"
            );

            world.progress_steps = world.progress_steps.saturating_add(1);
            world.progress = Progress::after_steps(world.progress_steps, increment);
            out_events.push(Event::ProgressAdvanced {
                progress: world.progress,
            });

            if world.progress.is_complete() {
                world.progress_saturated = true;
                out_events.push(Event::ProgressSaturated { overdue });
            }
        }
        Command::RotateStep => {
            world.step = world.step.next(world.labels.len());
            out_events.push(Event::StepRotated { step: world.step });
        }
        Command::ReplaceSamples { samples } => {
            world.sample_generation = world.sample_generation.saturating_add(1);
            let count = samples.len();
            world.samples = samples;
            out_events.push(Event::SamplesReplaced {
                generation: world.sample_generation,
                count,
            });
        }
        Command::SignalCompletion => {
            if !world.progress_saturated {
                debug_assert!(false, "completion requested before progress saturated");
                return;
            }
            world.terminate(Termination::Completed);
            out_events.push(Event::SequenceCompleted);
        }
        Command::Teardown => {
            world.terminate(Termination::TornDown);
            out_events.push(Event::SequenceTornDown);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use portfolio_core::{
        Lifecycle, Progress, SampleSet, SequenceSnapshot, StepIndex, StepLabels,
    };

    /// Current progress value with full precision.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        world.progress
    }

    /// Current progress rounded for display.
    #[must_use]
    pub fn progress_percent(world: &World) -> u8 {
        world.progress.percent()
    }

    /// Reports whether progress has reached 100.
    #[must_use]
    pub fn is_progress_saturated(world: &World) -> bool {
        world.progress_saturated
    }

    /// Index of the current status label.
    #[must_use]
    pub fn step(world: &World) -> StepIndex {
        world.step
    }

    /// Text of the current status label.
    #[must_use]
    pub fn step_label(world: &World) -> &str {
        world.labels.label(world.step)
    }

    /// Labels the rotator cycles through.
    #[must_use]
    pub fn step_labels(world: &World) -> &StepLabels {
        &world.labels
    }

    /// Current decorative sample set.
    #[must_use]
    pub fn samples(world: &World) -> &SampleSet {
        &world.samples
    }

    /// Number of sample replacements since the sequence mounted.
    #[must_use]
    pub fn sample_generation(world: &World) -> u64 {
        world.sample_generation
    }

    /// Lifecycle state of the sequence.
    #[must_use]
    pub fn lifecycle(world: &World) -> Lifecycle {
        world.lifecycle
    }

    /// Number of clock ticks applied while active.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Total time applied while active.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Captures everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(world: &World) -> SequenceSnapshot {
        SequenceSnapshot {
            progress: world.progress,
            step: world.step,
            step_label: step_label(world).to_owned(),
            samples: world.samples.clone(),
            lifecycle: world.lifecycle,
        }
    }
}
