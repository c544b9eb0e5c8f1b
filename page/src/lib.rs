#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host shell around the loading sequence.
//!
//! The page starts in [`Phase::Loading`] with a mounted splash, switches to
//! [`Phase::Content`] once the splash reports completion, and tracks the
//! navigation menu and section reveals while content is shown.

use std::{cell::Cell, rc::Rc, time::Duration};

use log::{debug, info};
use portfolio_core::{Section, SequenceSnapshot, Visibility, VisibilityReport};
use portfolio_sequence::{LoadingSequence, ValidatedConfig};
use portfolio_system_reveal::Reveal;

/// Which part of the page is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The splash is mounted and running.
    Loading,
    /// The splash finished and the portfolio content is shown.
    Content,
    /// The page was navigated away from.
    Unmounted,
}

/// Everything the rendering layer needs to draw the page for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    /// Current phase.
    pub phase: Phase,
    /// Whether the navigation menu is expanded.
    pub menu_open: bool,
    /// Splash state while loading.
    pub splash: Option<SequenceSnapshot>,
    /// Sections whose entry animation already ran, in navigation order.
    pub revealed: Vec<Section>,
}

/// Portfolio page owning the splash for the duration of the loading phase.
#[derive(Debug)]
pub struct Page {
    phase: Phase,
    splash: Option<LoadingSequence>,
    splash_done: Rc<Cell<bool>>,
    menu_open: bool,
    reveal: Reveal,
}

impl Page {
    /// Mounts the page with a freshly started splash.
    #[must_use]
    pub fn mount(config: &ValidatedConfig) -> Self {
        let splash_done = Rc::new(Cell::new(false));
        let splash = {
            let splash_done = Rc::clone(&splash_done);
            LoadingSequence::mount(config, move || splash_done.set(true))
        };

        Self {
            phase: Phase::Loading,
            splash: Some(splash),
            splash_done,
            menu_open: false,
            reveal: Reveal::new(),
        }
    }

    /// Advances the splash by `dt` and swaps in the content once it finishes.
    pub fn advance(&mut self, dt: Duration) {
        if self.phase != Phase::Loading {
            return;
        }
        if let Some(splash) = self.splash.as_mut() {
            splash.advance(dt);
        }
        if self.splash_done.get() {
            if let Some(splash) = self.splash.take() {
                info!("splash finished after {:?}; showing content", splash.elapsed());
            }
            self.phase = Phase::Content;
        }
    }

    /// Leaves the page, discarding a splash that has not finished yet.
    pub fn unmount(&mut self) {
        if let Some(mut splash) = self.splash.take() {
            splash.teardown();
        }
        self.menu_open = false;
        self.phase = Phase::Unmounted;
        debug!("page unmounted");
    }

    /// Current phase of the page.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mounted splash, if the page is still loading.
    #[must_use]
    pub fn splash(&self) -> Option<&LoadingSequence> {
        self.splash.as_ref()
    }

    /// Flips the navigation menu between expanded and collapsed.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Collapses the navigation menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Reports whether the navigation menu is expanded.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Scrolls to `section`, returning the anchor to scroll to.
    ///
    /// Navigation closes the menu. There is nothing to scroll to until the
    /// content is shown.
    pub fn navigate(&mut self, section: Section) -> Option<&'static str> {
        if self.phase != Phase::Content {
            return None;
        }
        self.close_menu();
        debug!("navigating to #{}", section.anchor());
        Some(section.anchor())
    }

    /// Feeds a viewport observation, returning `true` when it revealed the section.
    pub fn report_visibility(&mut self, section: Section, visibility: Visibility) -> bool {
        if self.phase != Phase::Content {
            return false;
        }
        let mut revealed = Vec::new();
        self.reveal.handle(
            &[VisibilityReport::new(section, visibility)],
            &mut revealed,
        );
        !revealed.is_empty()
    }

    /// Reports whether the section's entry animation already ran.
    #[must_use]
    pub fn revealed(&self, section: Section) -> bool {
        self.reveal.is_revealed(section)
    }

    /// Captures the page state for the rendering layer.
    #[must_use]
    pub fn view(&self) -> PageView {
        PageView {
            phase: self.phase,
            menu_open: self.menu_open,
            splash: self.splash.as_ref().map(LoadingSequence::snapshot),
            revealed: self.reveal.revealed().collect(),
        }
    }
}
