// src/carousel/mod.rs

//! Rotating fact display with a timed auto-advance.
//!
//! [`Carousel`] is the synchronous state machine; [`driver`] runs it on the
//! tokio runtime with a cancellable interval.

pub mod driver;
pub mod timer;

use serde::Serialize;
use tracing::debug;

use crate::error::{FactError, Result};
use crate::facts::Fact;

pub use driver::{CarouselCommand, CarouselHandle, spawn_carousel};
pub use timer::{ProgressTimer, TickOutcome, TimerConfig};

/// Snapshot of what the display should render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView {
    pub fact: Fact,
    pub index: usize,
    pub total: usize,
    pub progress: f64,
    pub suspended: bool,
    pub showing_override: bool,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    facts: Vec<Fact>,
    current_index: usize,
    active_override: Option<Fact>,
    timer: ProgressTimer,
}

impl Carousel {
    /// Build a carousel over a non-empty rotation
    pub fn new(facts: Vec<Fact>, config: TimerConfig) -> Result<Self> {
        if facts.is_empty() {
            return Err(FactError::EmptyRotation);
        }

        Ok(Self {
            facts,
            current_index: 0,
            active_override: None,
            timer: ProgressTimer::new(config),
        })
    }

    /// The fact on screen: the override if one is active, otherwise the rotation
    pub fn current(&self) -> &Fact {
        self.active_override
            .as_ref()
            .unwrap_or(&self.facts[self.current_index])
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Always false: [`Carousel::new`] refuses an empty rotation
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn active_override(&self) -> Option<&Fact> {
        self.active_override.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.timer.progress()
    }

    pub fn is_suspended(&self) -> bool {
        self.active_override.is_some() || self.timer.is_suspended()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.timer.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.timer.set_hovering(hovering);
    }

    /// Show a search-derived fact in place of the rotation.
    ///
    /// The timer stays frozen at its current progress until the override is
    /// cleared or the user navigates.
    pub fn show_override(&mut self, fact: Fact) {
        debug!(content = %fact.content, "showing override fact");
        self.active_override = Some(fact);
    }

    /// Return to the built-in rotation without moving the index
    pub fn clear_override(&mut self) {
        self.active_override = None;
    }

    pub fn next(&mut self) {
        Self::step_forward(&mut self.current_index, &mut self.active_override, self.facts.len());
        self.timer.reset();
    }

    pub fn previous(&mut self) {
        let len = self.facts.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.active_override = None;
        self.timer.reset();
    }

    /// Drive the timer by one tick, auto-advancing like [`next`](Self::next)
    pub fn tick(&mut self) -> TickOutcome {
        if self.active_override.is_some() {
            return TickOutcome::Suspended;
        }

        let len = self.facts.len();
        let index = &mut self.current_index;
        let active_override = &mut self.active_override;
        let outcome = self
            .timer
            .tick(|| Self::step_forward(index, active_override, len));

        if outcome == TickOutcome::Advanced {
            debug!(index = self.current_index, "auto-advanced");
        }
        outcome
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            fact: self.current().clone(),
            index: self.current_index,
            total: self.facts.len(),
            progress: self.progress(),
            suspended: self.is_suspended(),
            showing_override: self.active_override.is_some(),
        }
    }

    fn step_forward(index: &mut usize, active_override: &mut Option<Fact>, len: usize) {
        *index = (*index + 1) % len;
        *active_override = None;
    }
}
