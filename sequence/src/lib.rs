#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loading sequence controller.
//!
//! [`LoadingSequence`] mounts the authoritative splash world together with the
//! progress, step rotation, ambient sampling and completion systems, pumps
//! commands and events between them on every clock advance, and delivers the
//! host's completion callback at most once.

mod config;

use std::{fmt, time::Duration};

use log::{debug, info, trace};
use portfolio_core::{Command, Event, Lifecycle, Progress, SampleSet, SequenceSnapshot};
use portfolio_system_ambient::{self as ambient, AmbientSampler};
use portfolio_system_completion::{self as completion, Completion};
use portfolio_system_progress::{self as progress, ProgressDriver};
use portfolio_system_step_rotation::{self as step_rotation, StepRotation};
use portfolio_world::{self as world, query, World};

pub use config::{
    ConfigError, Preset, SequenceConfig, TimerKind, ValidatedConfig, MAX_SAMPLE_COUNT,
};

type CompletionCallback = Box<dyn FnOnce()>;

/// Splash controller owning the world, its timer systems and the host callback.
///
/// Dropping the sequence tears it down, so discarding it before completion
/// never invokes the callback.
pub struct LoadingSequence {
    world: World,
    progress: ProgressDriver,
    steps: StepRotation,
    ambient: AmbientSampler,
    completion: Completion,
    on_complete: Option<CompletionCallback>,
}

impl LoadingSequence {
    /// Mounts a sequence and draws its first sample set.
    ///
    /// `on_complete` runs once, after progress saturates and the grace delay
    /// elapses, unless the sequence is torn down first.
    pub fn mount<F>(config: &ValidatedConfig, on_complete: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let mut sequence = Self {
            world: World::new(config.step_labels.clone()),
            progress: ProgressDriver::new(progress::Config::new(
                config.progress_interval,
                config.progress_increment,
            )),
            steps: StepRotation::new(step_rotation::Config::new(config.step_interval)),
            ambient: AmbientSampler::new(ambient::Config::new(
                config.sample_interval,
                config.sample_count,
                config.seed,
            )),
            completion: Completion::new(completion::Config::new(config.grace_delay)),
            on_complete: Some(Box::new(on_complete)),
        };

        let mut primed = Vec::new();
        sequence.ambient.prime(&mut primed);
        sequence.execute(primed);
        debug!(
            "loading sequence mounted with {} labels",
            query::step_labels(&sequence.world).len()
        );
        sequence
    }

    /// Advances every timer by `dt`. A no-op once the sequence has terminated.
    pub fn advance(&mut self, dt: Duration) {
        self.execute(vec![Command::Tick { dt }]);
    }

    /// Cancels every timer and suppresses any pending completion.
    ///
    /// Calling this on a terminated sequence has no effect.
    pub fn teardown(&mut self) {
        self.execute(vec![Command::Teardown]);
        let _ = self.on_complete.take();
    }

    /// Lifecycle state of the sequence.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        query::lifecycle(&self.world)
    }

    /// Reports whether the timers are still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }

    /// Current progress value with full precision.
    #[must_use]
    pub fn progress(&self) -> Progress {
        query::progress(&self.world)
    }

    /// Current progress rounded for display.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        query::progress_percent(&self.world)
    }

    /// Text of the current status label.
    #[must_use]
    pub fn step_label(&self) -> &str {
        query::step_label(&self.world)
    }

    /// Current decorative sample set.
    #[must_use]
    pub fn samples(&self) -> &SampleSet {
        query::samples(&self.world)
    }

    /// Total clock time applied while the sequence was active.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        query::elapsed(&self.world)
    }

    /// Captures everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> SequenceSnapshot {
        query::snapshot(&self.world)
    }

    fn execute(&mut self, commands: Vec<Command>) {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        self.pump(events);
    }

    fn pump(&mut self, pending_events: Vec<Event>) {
        let mut events = pending_events;
        let mut rounds = 0_u32;

        while !events.is_empty() {
            rounds += 1;
            self.observe(&events);

            let mut commands = Vec::new();
            self.progress.handle(&events, &mut commands);
            self.steps.handle(&events, &mut commands);
            self.ambient.handle(&events, &mut commands);
            self.completion.handle(&events, &mut commands);

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        trace!("pump settled after {rounds} rounds");
    }

    fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ProgressSaturated { overdue } => {
                    debug!(
                        "progress saturated at {:?} ({overdue:?} overdue); completion scheduled",
                        query::elapsed(&self.world)
                    );
                }
                Event::SequenceCompleted => {
                    let callback = self.on_complete.take();
                    debug_assert!(callback.is_some(), "completion delivered twice");
                    if let Some(callback) = callback {
                        info!(
                            "loading sequence completed after {:?}",
                            query::elapsed(&self.world)
                        );
                        callback();
                    }
                }
                Event::SequenceTornDown => {
                    info!(
                        "loading sequence torn down at {}%",
                        query::progress_percent(&self.world)
                    );
                    let _ = self.on_complete.take();
                }
                _ => {}
            }
        }
    }
}

impl Drop for LoadingSequence {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for LoadingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingSequence")
            .field("world", &self.world)
            .field("progress", &self.progress)
            .field("steps", &self.steps)
            .field("ambient", &self.ambient)
            .field("completion", &self.completion)
            .field("callback_pending", &self.on_complete.is_some())
            .finish()
    }
}
