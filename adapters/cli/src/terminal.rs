//! Line-oriented terminal backend.

use std::{
    io::{self, IsTerminal, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use portfolio_rendering::{Presentation, RenderingBackend, SplashScene};

/// Redraws the splash as a single progress line on stdout in wall-clock time.
#[derive(Debug)]
pub(crate) struct TerminalBackend {
    frame_interval: Duration,
    bar_width: usize,
}

impl TerminalBackend {
    /// Creates a backend that sleeps `frame_interval` between frames.
    pub(crate) fn new(frame_interval: Duration, bar_width: usize) -> Self {
        Self {
            frame_interval,
            bar_width,
        }
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut SplashScene) -> bool,
    {
        let Presentation {
            window_title,
            clear_color,
            mut scene,
        } = presentation;

        let stdout = io::stdout();
        let colored = stdout.is_terminal();
        let mut out = stdout.lock();
        let [red, green, blue] = clear_color.to_rgb_u8();
        let (open, close) = if colored {
            (format!("\x1b[48;2;{red};{green};{blue}m"), "\x1b[0m")
        } else {
            (String::new(), "")
        };

        writeln!(out, "{window_title}").context("failed to write splash header")?;
        writeln!(out, "{}", scene.title).context("failed to write splash header")?;
        writeln!(out, "{}", scene.subtitle).context("failed to write splash header")?;

        let mut last = Instant::now();
        loop {
            thread::sleep(self.frame_interval);
            let now = Instant::now();
            let keep_running = update_scene(now.duration_since(last), &mut scene);
            last = now;

            write!(
                out,
                "\r{open}{}{close}\x1b[K",
                render_line(&scene, self.bar_width)
            )
            .context("failed to draw splash frame")?;
            out.flush().context("failed to flush splash frame")?;

            if !keep_running {
                break;
            }
        }

        writeln!(out).context("failed to finish splash output")?;
        Ok(())
    }
}

/// Formats one frame as `[#####.....]  40%  Loading...`.
pub(crate) fn render_line(scene: &SplashScene, bar_width: usize) -> String {
    let filled = ((scene.fill.clamp(0.0, 1.0) * bar_width as f32).round() as usize).min(bar_width);
    format!(
        "[{}{}] {:>4}  {}",
        "#".repeat(filled),
        ".".repeat(bar_width - filled),
        scene.percent_label,
        scene.step_label
    )
}
