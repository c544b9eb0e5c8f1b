#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for portfolio splash adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use portfolio_core::{SequenceSnapshot, SAMPLE_RANGE, SPLASH_SUBTITLE, SPLASH_TITLE};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Size of the rectangle the decorative samples are scattered across.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerSize {
    width: f32,
    height: f32,
}

impl ContainerSize {
    /// Creates a container size, rejecting empty or non-finite rectangles.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        let valid = |side: f32| side.is_finite() && side > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RenderingError::InvalidContainer { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width of the container.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the container.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Maps percent coordinates onto the container.
    #[must_use]
    pub fn place(&self, x_percent: f32, y_percent: f32) -> Vec2 {
        Vec2::new(x_percent, y_percent) / SAMPLE_RANGE * Vec2::new(self.width, self.height)
    }
}

/// Decorative data point positioned inside the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleMarker {
    /// Position relative to the container's top-left corner.
    pub position: Vec2,
    /// Normalised sample value in the range 0.0..=1.0.
    pub intensity: f32,
}

/// Backend-agnostic description of one splash frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SplashScene {
    /// Headline shown above the progress bar.
    pub title: String,
    /// Caption shown below the headline.
    pub subtitle: String,
    /// Rounded progress text such as `40%`.
    pub percent_label: String,
    /// Current status label.
    pub step_label: String,
    /// Portion of the progress bar to fill, in 0.0..=1.0.
    pub fill: f32,
    /// Container the markers are laid out in.
    pub container: ContainerSize,
    /// Decorative markers of the current sample set.
    pub markers: Vec<SampleMarker>,
    /// Whether the splash is still running.
    pub active: bool,
}

impl SplashScene {
    /// Builds the scene that depicts `snapshot` inside `container`.
    #[must_use]
    pub fn from_snapshot(snapshot: &SequenceSnapshot, container: ContainerSize) -> Self {
        let markers = snapshot
            .samples
            .iter()
            .map(|point| SampleMarker {
                position: container.place(point.x(), point.y()),
                intensity: (point.value() / SAMPLE_RANGE).clamp(0.0, 1.0),
            })
            .collect();

        Self {
            title: SPLASH_TITLE.to_owned(),
            subtitle: SPLASH_SUBTITLE.to_owned(),
            percent_label: format!("{}%", snapshot.percent()),
            step_label: snapshot.step_label.clone(),
            fill: snapshot.progress.fraction(),
            container,
            markers,
            active: snapshot.lifecycle.is_active(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: SplashScene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: SplashScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting the loading splash.
pub trait RenderingBackend {
    /// Runs the rendering backend until the splash is over.
    ///
    /// The provided `update_scene` closure receives the frame delta and may
    /// mutate the scene before it is drawn. Returning `false` ends the loop
    /// after the current frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut SplashScene) -> bool;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The sample container must have a positive, finite area.
    InvalidContainer {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainer { width, height } => {
                write!(
                    f,
                    "container must have a positive size (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
