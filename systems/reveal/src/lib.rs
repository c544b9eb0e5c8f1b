#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fire-once reveal observers for page sections.
//!
//! A section's entry animation runs the first time the section becomes
//! visible and never again for the same page visit.

use std::collections::BTreeSet;

use portfolio_core::{Section, Visibility, VisibilityReport};

/// Pure system that turns visibility reports into one-shot reveals.
#[derive(Debug, Default)]
pub struct Reveal {
    revealed: BTreeSet<Section>,
}

impl Reveal {
    /// Creates a new reveal system with nothing revealed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes visibility reports and emits sections revealed for the first time.
    pub fn handle(&mut self, reports: &[VisibilityReport], out: &mut Vec<Section>) {
        for report in reports {
            if report.visibility != Visibility::Visible {
                continue;
            }
            if self.revealed.insert(report.section) {
                out.push(report.section);
            }
        }
    }

    /// Reports whether the section has already been revealed.
    #[must_use]
    pub fn is_revealed(&self, section: Section) -> bool {
        self.revealed.contains(&section)
    }

    /// Iterator over revealed sections in navigation order.
    pub fn revealed(&self) -> impl Iterator<Item = Section> + '_ {
        self.revealed.iter().copied()
    }

    /// Forgets every reveal so the next visit animates again.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }
}
