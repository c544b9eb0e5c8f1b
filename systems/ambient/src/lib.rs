#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ambient data sampler that regenerates decorative points for the splash.
//!
//! Every draw replaces the entire sample set. Points are uniformly distributed
//! in `[0, 100)` on each axis and carry no identity between draws. Sampling is
//! driven by a seeded ChaCha generator so replays are reproducible.

use std::time::Duration;

use portfolio_core::{Command, Event, SamplePoint, SampleSet, SAMPLE_RANGE};
use rand::{distributions::Uniform, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the ambient sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: Duration,
    sample_count: usize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, size and seed.
    #[must_use]
    pub const fn new(tick_interval: Duration, sample_count: usize, rng_seed: u64) -> Self {
        Self {
            tick_interval,
            sample_count,
            rng_seed,
        }
    }

    /// Time between two sample set replacements.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Number of points in every sample set.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Pure system that emits a fresh sample set per elapsed interval.
#[derive(Debug)]
pub struct AmbientSampler {
    tick_interval: Duration,
    sample_count: usize,
    accumulator: Duration,
    rng: ChaCha8Rng,
    distribution: Uniform<f32>,
    cancelled: bool,
}

impl AmbientSampler {
    /// Creates a new sampler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            sample_count: config.sample_count,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            distribution: Uniform::new(0.0, SAMPLE_RANGE),
            cancelled: false,
        }
    }

    /// Emits the initial sample set so the first frame is never empty.
    pub fn prime(&mut self, out: &mut Vec<Command>) {
        if self.cancelled {
            return;
        }
        let samples = self.draw();
        out.push(Command::ReplaceSamples { samples });
    }

    /// Reports whether the sampler was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Consumes events to emit sample replacement commands.
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
            let samples = self.draw();
            out.push(Command::ReplaceSamples { samples });
        }
    }

    fn draw(&mut self) -> SampleSet {
        let points = (0..self.sample_count)
            .map(|_| {
                let x = self.rng.sample(self.distribution);
                let y = self.rng.sample(self.distribution);
                let value = self.rng.sample(self.distribution);
                SamplePoint::new(x, y, value)
            })
            .collect();
        SampleSet::new(points)
    }
}
