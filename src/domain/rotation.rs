//! Slide rotation state machine for the unattended display.
//!
//! Slide 0 is always the countdown; notice slides follow it and are replaced
//! wholesale on every feed snapshot. The engine owns at most one dwell
//! deadline and never decides on its own when to wake up: the caller sleeps
//! until [`SlideRotationEngine::deadline`] and then calls
//! [`SlideRotationEngine::advance_if_due`].

use crate::domain::entities::{Notice, Slide};
use tokio::time::Instant;
use tracing::debug;

/// Current content and position of the rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    slides: Vec<Slide>,
    current_index: usize,
    since: Instant,
}

impl RotationState {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.current_index]
    }

    /// When the current slide became active.
    pub fn since(&self) -> Instant {
        self.since
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Never true: the countdown slide is permanent.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[derive(Debug)]
pub struct SlideRotationEngine {
    state: RotationState,
    /// Pending dwell expiry. `None` while parked on the lone countdown slide.
    deadline: Option<Instant>,
}

impl SlideRotationEngine {
    pub fn new(now: Instant) -> Self {
        Self {
            state: RotationState {
                slides: vec![Slide::Countdown],
                current_index: 0,
                since: now,
            },
            deadline: None,
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Replace the notice slides with `notices`.
    ///
    /// The index is kept when it is still in range and clamped to the last
    /// slide otherwise. A pending deadline is left untouched; a deadline is
    /// only armed when the engine was parked and now has something to rotate
    /// to, and dropped when the list shrinks back to the countdown alone.
    pub fn set_slides(&mut self, notices: Vec<Notice>, now: Instant) {
        let previous_len = self.state.slides.len();
        let mut slides = Vec::with_capacity(notices.len() + 1);
        slides.push(Slide::Countdown);
        slides.extend(notices.into_iter().map(Slide::Notice));
        self.state.slides = slides;

        let last = self.state.slides.len() - 1;
        if self.state.current_index > last {
            debug!(
                from = self.state.current_index,
                to = last,
                "slide index clamped after content shrink"
            );
            self.state.current_index = last;
            self.state.since = now;
        }

        match (self.state.slides.len(), self.deadline) {
            (1, Some(_)) => {
                debug!("no notices left; rotation parked on countdown");
                self.deadline = None;
            }
            (len, None) if len > 1 => {
                self.deadline = Some(now + self.state.current().dwell());
                debug!(slides = len, "rotation armed");
            }
            _ => {}
        }

        if previous_len != self.state.slides.len() {
            debug!(
                previous = previous_len,
                current = self.state.slides.len(),
                "slide list resized"
            );
        }
    }

    /// Advance to the next slide if the dwell deadline has passed. Returns
    /// whether the current slide changed.
    pub fn advance_if_due(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let state = &mut self.state;
        state.current_index = (state.current_index + 1) % state.slides.len();
        state.since = now;
        self.deadline = Some(now + state.current().dwell());
        true
    }
}
