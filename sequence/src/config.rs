//! Inbound configuration surface of the loading sequence.
//!
//! Configuration is layered: start from a [`Preset`], merge an optional TOML
//! document, then validate. Only a [`ValidatedConfig`] can mount a sequence.

use std::{fmt, time::Duration};

use portfolio_core::{Progress, StepLabels};
use serde::Deserialize;
use thiserror::Error;

const PIPELINE_LABELS: [&str; 7] = [
    "Initializing Data Pipeline...",
    "Connecting to Database...",
    "Processing Raw Data...",
    "Running Analytics...",
    "Generating Insights...",
    "Building Dashboard...",
    "Finalizing Results...",
];

const COMPACT_LABELS: [&str; 4] = [
    "Connecting...",
    "Loading...",
    "Processing...",
    "Building...",
];

const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Largest decorative sample set a configuration may request.
pub const MAX_SAMPLE_COUNT: usize = 1_000;

/// Named configuration presets observed across splash variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Seven-step data pipeline caption, 2.0 per tick, 500 ms grace.
    #[default]
    Pipeline,
    /// Four-step caption, 1.5 per tick, 250 ms grace.
    Compact,
}

/// Timer named in a configuration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Progress driver cadence.
    Progress,
    /// Step label rotation cadence.
    Step,
    /// Ambient sampler cadence.
    Sample,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progress => write!(f, "progress"),
            Self::Step => write!(f, "step"),
            Self::Sample => write!(f, "sample"),
        }
    }
}

/// Errors raised while loading or validating a sequence configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The progress increment was zero, negative or not finite.
    #[error("progress increment must be a positive finite number (received {increment})")]
    NonPositiveIncrement {
        /// Increment that failed validation.
        increment: f64,
    },
    /// A repeating timer was configured with a zero interval.
    #[error("{timer} interval must be positive")]
    ZeroInterval {
        /// Timer whose interval was zero.
        timer: TimerKind,
    },
    /// The label rotation had no entries.
    #[error("step label list must contain at least one entry")]
    EmptyLabels,
    /// The sampler was asked to draw zero points.
    #[error("sample count must be positive")]
    ZeroSampleCount,
    /// The sampler was asked to draw more points than a splash can show.
    #[error("sample count must not exceed {max} (received {count})")]
    TooManySamples {
        /// Requested number of points.
        count: usize,
        /// Largest accepted number of points.
        max: usize,
    },
    /// The TOML document could not be parsed.
    #[error("could not parse sequence configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unvalidated configuration of a loading sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceConfig {
    /// Time between two progress steps.
    pub progress_interval: Duration,
    /// Percentage points added per progress step.
    pub progress_increment: f64,
    /// Pause between saturation and the completion signal.
    pub grace_delay: Duration,
    /// Ordered status labels.
    pub step_labels: Vec<String>,
    /// Time between two label rotations.
    pub step_interval: Duration,
    /// Time between two sample set replacements.
    pub sample_interval: Duration,
    /// Number of points in every sample set.
    pub sample_count: usize,
    /// Seed of the ambient sampler's generator.
    pub seed: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl SequenceConfig {
    /// Builds the configuration of the provided preset.
    #[must_use]
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Pipeline => Self {
                progress_interval: Duration::from_millis(50),
                progress_increment: 2.0,
                grace_delay: Duration::from_millis(500),
                step_labels: PIPELINE_LABELS.iter().map(|s| (*s).to_owned()).collect(),
                step_interval: Duration::from_millis(800),
                sample_interval: Duration::from_millis(2000),
                sample_count: 20,
                seed: DEFAULT_SEED,
            },
            Preset::Compact => Self {
                progress_interval: Duration::from_millis(50),
                progress_increment: 1.5,
                grace_delay: Duration::from_millis(250),
                step_labels: COMPACT_LABELS.iter().map(|s| (*s).to_owned()).collect(),
                step_interval: Duration::from_millis(1200),
                sample_interval: Duration::from_millis(2000),
                sample_count: 20,
                seed: DEFAULT_SEED,
            },
        }
    }

    /// Overrides fields present in the TOML document, keeping the rest.
    pub fn merge_toml(mut self, contents: &str) -> Result<Self, ConfigError> {
        let overrides: Overrides = toml::from_str(contents)?;
        overrides.apply(&mut self);
        Ok(self)
    }

    /// Checks every invariant the running sequence relies on.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if !(self.progress_increment > 0.0 && self.progress_increment.is_finite()) {
            return Err(ConfigError::NonPositiveIncrement {
                increment: self.progress_increment,
            });
        }
        for (timer, interval) in [
            (TimerKind::Progress, self.progress_interval),
            (TimerKind::Step, self.step_interval),
            (TimerKind::Sample, self.sample_interval),
        ] {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval { timer });
            }
        }
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }
        if self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ConfigError::TooManySamples {
                count: self.sample_count,
                max: MAX_SAMPLE_COUNT,
            });
        }
        let step_labels = StepLabels::new(self.step_labels).ok_or(ConfigError::EmptyLabels)?;

        Ok(ValidatedConfig {
            progress_interval: self.progress_interval,
            progress_increment: self.progress_increment,
            grace_delay: self.grace_delay,
            step_labels,
            step_interval: self.step_interval,
            sample_interval: self.sample_interval,
            sample_count: self.sample_count,
            seed: self.seed,
        })
    }
}

/// Configuration that passed validation and can mount a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    pub(crate) progress_interval: Duration,
    pub(crate) progress_increment: f64,
    pub(crate) grace_delay: Duration,
    pub(crate) step_labels: StepLabels,
    pub(crate) step_interval: Duration,
    pub(crate) sample_interval: Duration,
    pub(crate) sample_count: usize,
    pub(crate) seed: u64,
}

impl ValidatedConfig {
    /// Time between two progress steps.
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        self.progress_interval
    }

    /// Percentage points added per progress step.
    #[must_use]
    pub fn progress_increment(&self) -> f64 {
        self.progress_increment
    }

    /// Pause between saturation and the completion signal.
    #[must_use]
    pub fn grace_delay(&self) -> Duration {
        self.grace_delay
    }

    /// Number of progress steps needed to reach 100.
    #[must_use]
    pub fn ticks_to_complete(&self) -> u64 {
        Progress::steps_to_complete(self.progress_increment)
    }

    /// Earliest time after mounting at which completion may fire.
    #[must_use]
    pub fn expected_completion(&self) -> Duration {
        let ticks = u32::try_from(self.ticks_to_complete()).unwrap_or(u32::MAX);
        self.progress_interval
            .saturating_mul(ticks)
            .saturating_add(self.grace_delay)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Overrides {
    progress_interval_ms: Option<u64>,
    progress_increment: Option<f64>,
    grace_delay_ms: Option<u64>,
    step_labels: Option<StepLabels>,
    step_interval_ms: Option<u64>,
    sample_interval_ms: Option<u64>,
    sample_count: Option<usize>,
    seed: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut SequenceConfig) {
        if let Some(ms) = self.progress_interval_ms {
            config.progress_interval = Duration::from_millis(ms);
        }
        if let Some(increment) = self.progress_increment {
            config.progress_increment = increment;
        }
        if let Some(ms) = self.grace_delay_ms {
            config.grace_delay = Duration::from_millis(ms);
        }
        if let Some(labels) = self.step_labels {
            config.step_labels = labels.into();
        }
        if let Some(ms) = self.step_interval_ms {
            config.step_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.sample_interval_ms {
            config.sample_interval = Duration::from_millis(ms);
        }
        if let Some(count) = self.sample_count {
            config.sample_count = count;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pipeline_preset() {
        assert_eq!(SequenceConfig::default(), SequenceConfig::preset(Preset::Pipeline));
    }

    #[test]
    fn presets_validate() {
        for preset in [Preset::Pipeline, Preset::Compact] {
            let validated = SequenceConfig::preset(preset)
                .validate()
                .expect("presets are valid");
            assert!(validated.progress_increment() > 0.0);
        }
    }

    #[test]
    fn ticks_to_complete_rounds_up() {
        let compact = SequenceConfig::preset(Preset::Compact)
            .validate()
            .expect("valid preset");
        assert_eq!(compact.ticks_to_complete(), 67);
        assert_eq!(
            compact.expected_completion(),
            Duration::from_millis(67 * 50 + 250)
        );
    }

    #[test]
    fn merge_overrides_only_present_fields() {
        let config = SequenceConfig::preset(Preset::Compact)
            .merge_toml(
                r#"
                progress_increment = 2.0
                step_labels = ["Warming up..."]
                "#,
            )
            .expect("valid toml");

        assert_eq!(config.progress_increment, 2.0);
        assert_eq!(config.step_labels, vec!["Warming up...".to_owned()]);
        assert_eq!(config.grace_delay, Duration::from_millis(250));
        assert_eq!(config.step_interval, Duration::from_millis(1200));
    }

    #[test]
    fn merge_rejects_unknown_fields() {
        let error = SequenceConfig::default()
            .merge_toml("progress_speed = 3")
            .expect_err("unknown keys are rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_non_positive_increment() {
        for increment in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let config = SequenceConfig {
                progress_increment: increment,
                ..SequenceConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveIncrement { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_zero_intervals() {
        let config = SequenceConfig {
            step_interval: Duration::ZERO,
            ..SequenceConfig::default()
        };
        let error = config.validate().expect_err("zero interval rejected");
        assert!(matches!(
            error,
            ConfigError::ZeroInterval {
                timer: TimerKind::Step
            }
        ));
        assert_eq!(error.to_string(), "step interval must be positive");
    }

    #[test]
    fn validate_rejects_empty_labels_and_samples() {
        let no_labels = SequenceConfig {
            step_labels: Vec::new(),
            ..SequenceConfig::default()
        };
        assert!(matches!(no_labels.validate(), Err(ConfigError::EmptyLabels)));

        let no_samples = SequenceConfig {
            sample_count: 0,
            ..SequenceConfig::default()
        };
        assert!(matches!(
            no_samples.validate(),
            Err(ConfigError::ZeroSampleCount)
        ));
    }

    #[test]
    fn merge_rejects_empty_label_list() {
        let error = SequenceConfig::default()
            .merge_toml("step_labels = []")
            .expect_err("empty label lists are rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn validate_bounds_sample_count() {
        let at_limit = SequenceConfig {
            sample_count: MAX_SAMPLE_COUNT,
            ..SequenceConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = SequenceConfig::default()
            .merge_toml("sample_count = 10000000")
            .expect("count fits in usize");
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::TooManySamples {
                count: 10_000_000,
                max: MAX_SAMPLE_COUNT,
            })
        ));
    }

    #[test]
    fn ticks_to_complete_counts_inexact_increments_exactly() {
        for (increment, ticks) in [(0.1, 1000), (0.8, 125)] {
            let config = SequenceConfig {
                progress_increment: increment,
                ..SequenceConfig::default()
            }
            .validate()
            .expect("valid increment");
            assert_eq!(config.ticks_to_complete(), ticks);
        }
    }

    #[test]
    fn zero_grace_delay_is_allowed() {
        let config = SequenceConfig {
            grace_delay: Duration::ZERO,
            ..SequenceConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
