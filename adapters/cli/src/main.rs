#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the portfolio loading splash.

mod terminal;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use portfolio_core::{Section, Visibility};
use portfolio_page::{Page, Phase};
use portfolio_rendering::{Color, ContainerSize, Presentation, RenderingBackend, SplashScene};
use portfolio_sequence::{Preset, SequenceConfig, ValidatedConfig};
use rand::Rng;

use crate::terminal::TerminalBackend;

const CLEAR_COLOR: Color = Color::from_rgb_u8(15, 23, 42);

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-splash",
    version,
    about = "Play the portfolio loading splash in the terminal"
)]
struct Cli {
    /// Configuration preset to start from
    #[arg(long, value_enum, default_value_t = PresetChoice::Pipeline)]
    preset: PresetChoice,

    /// TOML file overriding preset values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the decorative sample generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Time between two redraws, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Width of the progress bar, in columns
    #[arg(long, default_value_t = 40)]
    width: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Pipeline,
    Compact,
}

impl From<PresetChoice> for Preset {
    fn from(choice: PresetChoice) -> Self {
        match choice {
            PresetChoice::Pipeline => Preset::Pipeline,
            PresetChoice::Compact => Preset::Compact,
        }
    }
}

/// Entry point for the portfolio splash command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }

    let config = load_config(&cli)?;
    let container = ContainerSize::new(cli.width.max(1) as f32, 1.0)
        .context("invalid progress bar width")?;
    let mut page = Page::mount(&config);

    let initial = page
        .view()
        .splash
        .context("page mounted without a splash")?;
    let presentation = Presentation::new(
        "Portfolio",
        CLEAR_COLOR,
        SplashScene::from_snapshot(&initial, container),
    );

    let backend = TerminalBackend::new(Duration::from_millis(cli.frame_ms), cli.width);
    backend.run(presentation, |dt, scene| {
        advance_frame(&mut page, container, dt, scene)
    })?;

    if page.phase() != Phase::Content {
        bail!("splash ended without completing");
    }

    // The first section is in the viewport as soon as content appears.
    if page.report_visibility(Section::ALL[0], Visibility::Visible) {
        debug!("revealed #{}", Section::ALL[0].anchor());
    }

    println!();
    for section in Section::ALL {
        println!("  {:<12} #{}", section.title(), section.anchor());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ValidatedConfig> {
    let mut config = SequenceConfig::preset(cli.preset.into());

    if let Some(path) = &cli.config {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        config = config
            .merge_toml(&contents)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    // Seeds from a configuration file are kept unless the flag overrides them.
    match (cli.seed, &cli.config) {
        (Some(seed), _) => config.seed = seed,
        (None, None) => config.seed = rand::thread_rng().gen(),
        (None, Some(_)) => {}
    }
    info!("sampling with seed {}", config.seed);

    config.validate().context("invalid splash configuration")
}

fn advance_frame(
    page: &mut Page,
    container: ContainerSize,
    dt: Duration,
    scene: &mut SplashScene,
) -> bool {
    page.advance(dt);
    match page.view().splash {
        Some(snapshot) => {
            *scene = SplashScene::from_snapshot(&snapshot, container);
            scene.active
        }
        None => {
            scene.active = false;
            false
        }
    }
}
