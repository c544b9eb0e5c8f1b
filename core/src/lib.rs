#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the portfolio splash engine.
//!
//! This crate defines the message surface that connects the loading sequence
//! controller, the authoritative world, and the pure timer systems. The
//! controller submits [`Command`] values describing desired mutations, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values for systems to react to deterministically.
//! Systems consume event streams and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Headline shown on the splash while the sequence runs.
pub const SPLASH_TITLE: &str = "Data Analytics Dashboard";

/// Secondary line shown beneath the splash headline.
pub const SPLASH_SUBTITLE: &str = "Loading Portfolio";

/// Exclusive upper bound of every sample coordinate and magnitude.
pub const SAMPLE_RANGE: f32 = 100.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the sequence clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a single progress driver step of the provided size.
    AdvanceProgress {
        /// Percentage points added by this step before clamping.
        increment: f64,
        /// How long ago the step fell due, measured at the end of the frame.
        overdue: Duration,
    },
    /// Requests that the status label rotate to the next entry.
    RotateStep,
    /// Requests that the decorative sample set be replaced wholesale.
    ReplaceSamples {
        /// Freshly drawn samples that supersede the current set.
        samples: SampleSet,
    },
    /// Requests that the completion signal be delivered to the host.
    SignalCompletion,
    /// Requests that the sequence be torn down before or after completion.
    Teardown,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the sequence clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the progress driver stepped.
    ProgressAdvanced {
        /// Progress value after the step was clamped.
        progress: Progress,
    },
    /// Announces that progress reached exactly 100 for the first time.
    ProgressSaturated {
        /// Time elapsed since the saturating step fell due.
        overdue: Duration,
    },
    /// Confirms that the status label advanced.
    StepRotated {
        /// Index of the label that is now current.
        step: StepIndex,
    },
    /// Confirms that the decorative sample set was replaced.
    SamplesReplaced {
        /// Monotonic counter of replacements since the sequence mounted.
        generation: u64,
        /// Number of points in the new set.
        count: usize,
    },
    /// Announces that the completion signal was delivered.
    SequenceCompleted,
    /// Announces that the host discarded the sequence.
    SequenceTornDown,
}

/// Completion percentage owned by the progress driver.
///
/// The stored value keeps full precision; [`Progress::percent`] is the rounded
/// display value.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    /// Progress of a freshly mounted sequence.
    pub const ZERO: Self = Self(0.0);

    /// Saturation point of the progress driver.
    pub const COMPLETE: Self = Self(100.0);

    /// Creates a progress value, clamping it into `0..=100`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, Self::COMPLETE.0))
    }

    /// Number of steps of size `increment` needed to reach 100.
    #[must_use]
    pub fn steps_to_complete(increment: f64) -> u64 {
        (Self::COMPLETE.0 / increment).ceil() as u64
    }

    /// Progress after `steps` steps of size `increment`.
    ///
    /// Computed from the step count rather than a running sum, so the value
    /// saturates after exactly [`Progress::steps_to_complete`] steps.
    #[must_use]
    pub fn after_steps(steps: u64, increment: f64) -> Self {
        if steps >= Self::steps_to_complete(increment) {
            return Self::COMPLETE;
        }
        Self::new(steps as f64 * increment)
    }

    /// Raw stored value in `0.0..=100.0`.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Display percentage rounded to the nearest integer.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.0.round() as u8
    }

    /// Fraction of the bar that should be filled, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        (self.0 / Self::COMPLETE.0) as f32
    }

    /// Reports whether the progress has saturated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0 >= Self::COMPLETE.0
    }
}

/// Index into the ordered list of status labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepIndex(usize);

impl StepIndex {
    /// Creates a new step index with the provided numeric value.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Returns the following index, wrapping around a list of `len` labels.
    ///
    /// A zero length yields index zero instead of dividing by zero.
    #[must_use]
    pub const fn next(self, len: usize) -> Self {
        if len == 0 {
            return Self(0);
        }
        Self((self.0 + 1) % len)
    }
}

/// Ordered, non-empty list of status labels shown while loading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StepLabels {
    labels: Vec<String>,
}

impl StepLabels {
    /// Creates a label list, returning `None` when it would be empty.
    #[must_use]
    pub fn new<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            None
        } else {
            Some(Self { labels })
        }
    }

    /// Number of labels in the rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at the provided index, wrapping out-of-range indices.
    #[must_use]
    pub fn label(&self, step: StepIndex) -> &str {
        &self.labels[step.get() % self.labels.len()]
    }

    /// Iterator over the labels in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for StepLabels {
    type Error = &'static str;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels).ok_or("step label list must not be empty")
    }
}

impl From<StepLabels> for Vec<String> {
    fn from(labels: StepLabels) -> Self {
        labels.labels
    }
}

/// Decorative point drawn by the ambient sampler.
///
/// Coordinates are percentages of the rendering container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    x: f32,
    y: f32,
    value: f32,
}

impl SamplePoint {
    /// Creates a new sample point.
    #[must_use]
    pub const fn new(x: f32, y: f32, value: f32) -> Self {
        Self { x, y, value }
    }

    /// Horizontal position as a percentage of the container width.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position as a percentage of the container height.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Decorative magnitude with no semantic meaning.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Reports whether every component lies in `0.0..SAMPLE_RANGE`.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        let range = 0.0..SAMPLE_RANGE;
        range.contains(&self.x) && range.contains(&self.y) && range.contains(&self.value)
    }
}

/// Snapshot of decorative points, valid until the next replacement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    points: Vec<SamplePoint>,
}

impl SampleSet {
    /// Creates a sample set from the provided points.
    #[must_use]
    pub fn new(points: Vec<SamplePoint>) -> Self {
        Self { points }
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Reports whether the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in draw order.
    #[must_use]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Iterator over the points in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &SamplePoint> {
        self.points.iter()
    }
}

/// Lifecycle of a loading sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Timers are running and the completion signal has not fired.
    #[default]
    Active,
    /// Terminal state; every timer is cancelled.
    Terminated(Termination),
}

impl Lifecycle {
    /// Reports whether the sequence is still running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Reason a sequence left the active state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Progress saturated, the grace delay elapsed and the host was notified.
    Completed,
    /// The host discarded the sequence; the completion signal never fired.
    TornDown,
}

/// Read-only state a renderer needs to draw one splash frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceSnapshot {
    /// Current progress value.
    pub progress: Progress,
    /// Index of the current status label.
    pub step: StepIndex,
    /// Text of the current status label.
    pub step_label: String,
    /// Current decorative sample set.
    pub samples: SampleSet,
    /// Lifecycle state of the sequence.
    pub lifecycle: Lifecycle,
}

impl SequenceSnapshot {
    /// Display percentage rounded to the nearest integer.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.progress.percent()
    }
}

/// Content sections of the page reachable from the navigation menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Profile and summary.
    About,
    /// Work history timeline.
    Experience,
    /// Project gallery.
    Projects,
    /// Skill visualisations.
    Skills,
    /// Contact form and links.
    Contact,
}

impl Section {
    /// Every section in navigation order.
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    /// Anchor identifier of the section element.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    /// Navigation label of the section.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }
}

/// Visibility of a section inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The section intersects the viewport.
    Visible,
    /// The section is outside the viewport.
    Hidden,
}

/// Visibility change observed by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibilityReport {
    /// Section whose visibility changed.
    pub section: Section,
    /// New visibility of the section.
    pub visibility: Visibility,
}

impl VisibilityReport {
    /// Creates a new visibility report.
    #[must_use]
    pub const fn new(section: Section, visibility: Visibility) -> Self {
        Self {
            section,
            visibility,
        }
    }
}
